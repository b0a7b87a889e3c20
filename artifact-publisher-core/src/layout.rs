//! Object names inside the bucket.
//!
//! Release candidates go under `{prefix}/release/{build}/`, every other build
//! under `{prefix}/buildkite/build-{pull_request}/{build}/`. The status report
//! always lands in the release directory of the build.

use crate::context::BuildContext;

pub const RELEASE_DIR: &str = "release";
pub const REPORT_FILE_NAME: &str = "report.html";

pub fn artifact_object_name(prefix: &str, context: &BuildContext, file_name: &str) -> String {
    if context.is_release {
        format!("{prefix}/{RELEASE_DIR}/{}/{file_name}", context.build_id)
    } else {
        format!(
            "{prefix}/buildkite/build-{}/{}/{file_name}",
            context.pull_request, context.build_id
        )
    }
}

pub fn report_object_name(prefix: &str, context: &BuildContext) -> String {
    format!("{prefix}/{RELEASE_DIR}/{}/{REPORT_FILE_NAME}", context.build_id)
}
