use artifact_publisher::gcs::GcsClient;
use artifact_publisher::github::GitHubClient;

fn gcs() -> GcsClient {
    GcsClient::new("https://storage.googleapis.com", "le-downloads", "token".into())
        .expect("Client should build")
}

fn github() -> GitHubClient {
    GitHubClient::new(
        "https://api.github.com",
        "https://uploads.github.com",
        "learningequality",
        "kolibri",
        "token".into(),
    )
    .expect("Client should build")
}

#[test]
fn test_gcs_upload_url_carries_object_name_as_query() {
    let url = gcs()
        .upload_url("kolibri/release/42/kolibri 0.16.exe")
        .unwrap();

    assert_eq!(
        url.as_str(),
        "https://storage.googleapis.com/upload/storage/v1/b/le-downloads/o?uploadType=media&name=kolibri%2Frelease%2F42%2Fkolibri+0.16.exe"
    );
}

#[test]
fn test_gcs_acl_url_encodes_object_name_as_one_segment() {
    let url = gcs().acl_url("kolibri/release/42/kolibri.exe").unwrap();

    assert_eq!(
        url.as_str(),
        "https://storage.googleapis.com/storage/v1/b/le-downloads/o/kolibri%2Frelease%2F42%2Fkolibri.exe/acl"
    );
}

#[test]
fn test_gcs_rejects_invalid_base_url() {
    assert!(GcsClient::new("not a url", "bucket", "token".into()).is_err());
}

#[test]
fn test_github_status_url() {
    let url = github().status_url("0123abcd").unwrap();
    assert_eq!(
        url.as_str(),
        "https://api.github.com/repos/learningequality/kolibri/statuses/0123abcd"
    );
}

#[test]
fn test_github_release_by_tag_url_encodes_tag() {
    let client = github();
    assert_eq!(
        client.release_by_tag_url("v0.16.0").unwrap().as_str(),
        "https://api.github.com/repos/learningequality/kolibri/releases/tags/v0.16.0"
    );
    assert_eq!(
        client.release_by_tag_url("release/v1").unwrap().as_str(),
        "https://api.github.com/repos/learningequality/kolibri/releases/tags/release%2Fv1"
    );
}

#[test]
fn test_github_release_assets_url_uses_uploads_host() {
    let url = github()
        .release_assets_url(77, "kolibri-0.16.0.exe", "Windows Installer")
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://uploads.github.com/repos/learningequality/kolibri/releases/77/assets?name=kolibri-0.16.0.exe&label=Windows+Installer"
    );
}

#[test]
fn test_github_enterprise_base_with_path_prefix() {
    let client = GitHubClient::new(
        "https://github.example.com/api/v3/",
        "https://github.example.com/api/uploads/",
        "team",
        "app",
        "token".into(),
    )
    .unwrap();
    assert_eq!(
        client.status_url("abc").unwrap().as_str(),
        "https://github.example.com/api/v3/repos/team/app/statuses/abc"
    );
}
