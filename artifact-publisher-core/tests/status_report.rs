use artifact_publisher_core::artifact::{kind_for_extension, Artifact, ArtifactSet, ARTIFACT_ORDER};
use artifact_publisher_core::report::render_status_report;
use std::path::PathBuf;

fn uploaded(extension: &str, name: &str) -> Artifact {
    let kind = kind_for_extension(extension).expect("known extension");
    let mut artifact = Artifact::from_kind(kind, name, PathBuf::from("dist").join(name));
    artifact.media_url = Some(format!("https://storage.example/{name}"));
    artifact
}

fn all_kinds() -> Vec<Artifact> {
    vec![
        uploaded("gz", "kolibri.tar.gz"),
        uploaded("whl", "kolibri.whl"),
        uploaded("apk", "kolibri.apk"),
        uploaded("zip", "kolibri.zip"),
        uploaded("exe", "kolibri.exe"),
        uploaded("pex", "kolibri.pex"),
    ]
}

#[test]
fn test_report_renders_exact_document() {
    let artifacts: ArtifactSet = all_kinds().into_iter().collect();

    let html = render_status_report(&artifacts);

    let expected = "<html>\n<body>\n<h1>Build Artifacts</h1>\n\
<h2>installer</h2>\n\
<p>Windows Installer: <a href='https://storage.example/kolibri.exe'>kolibri.exe</a></p>\n\
<p>Android Installer: <a href='https://storage.example/kolibri.apk'>kolibri.apk</a></p>\n\
<h2>Python package</h2>\n\
<p>Pex file: <a href='https://storage.example/kolibri.pex'>kolibri.pex</a></p>\n\
<p>Whl file: <a href='https://storage.example/kolibri.whl'>kolibri.whl</a></p>\n\
<p>Zip file: <a href='https://storage.example/kolibri.zip'>kolibri.zip</a></p>\n\
<p>Tar file: <a href='https://storage.example/kolibri.tar.gz'>kolibri.tar.gz</a></p>\n\
</body>\n</html>";
    assert_eq!(html, expected);
}

#[test]
fn test_report_is_independent_of_insertion_order() {
    let forward: ArtifactSet = all_kinds().into_iter().collect();
    let reversed: ArtifactSet = all_kinds().into_iter().rev().collect();

    assert_eq!(render_status_report(&forward), render_status_report(&reversed));
}

#[test]
fn test_report_follows_priority_order_and_keeps_categories_contiguous() {
    let artifacts: ArtifactSet = all_kinds().into_iter().collect();
    let html = render_status_report(&artifacts);

    let positions: Vec<usize> = ARTIFACT_ORDER
        .iter()
        .map(|ext| {
            let name = artifacts.get(ext).unwrap().name.clone();
            html.find(&format!(">{name}</a>")).expect("artifact listed")
        })
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "Artifacts must appear in priority order, got positions {positions:?}"
    );
    assert_eq!(html.matches("<h2>installer</h2>").count(), 1);
    assert_eq!(html.matches("<h2>Python package</h2>").count(), 1);
}

#[test]
fn test_report_skips_kinds_that_were_not_found() {
    let artifacts: ArtifactSet = vec![uploaded("whl", "kolibri.whl"), uploaded("apk", "kolibri.apk")]
        .into_iter()
        .collect();

    let html = render_status_report(&artifacts);

    assert!(!html.contains("Windows Installer"));
    assert!(!html.contains("Pex file"));
    let installer = html.find("<h2>installer</h2>").unwrap();
    let python = html.find("<h2>Python package</h2>").unwrap();
    assert!(installer < python);
}

#[test]
fn test_report_for_no_artifacts_has_only_the_frame() {
    let html = render_status_report(&ArtifactSet::new());
    assert_eq!(html, "<html>\n<body>\n<h1>Build Artifacts</h1>\n</body>\n</html>");
}

#[test]
fn test_report_escapes_names_and_urls() {
    let mut artifact = uploaded("zip", "a<b>&'c.zip");
    artifact.media_url = Some("https://storage.example/o?x=1&y='2'".to_string());
    let artifacts: ArtifactSet = vec![artifact].into_iter().collect();

    let html = render_status_report(&artifacts);

    assert!(html.contains(">a&lt;b&gt;&amp;&#39;c.zip</a>"), "got: {html}");
    assert!(html.contains("href='https://storage.example/o?x=1&amp;y=&#39;2&#39;'"));
}
