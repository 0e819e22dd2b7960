// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Rendering of the operator installer bundle and the Installation resource.

pub mod installation;
pub mod operator;
pub mod pull_secret;
pub mod suggestions;
pub mod versions;

pub use installation::{
    apply_installation_manifest, build_installation_manifests, render_installation_manifest,
    InstallationManifests, InstallationOptions,
};
pub use operator::{apply_operator_manifest, render_operator_manifest, OperatorManifestOptions};
pub use pull_secret::image_pull_secret;
pub use suggestions::{suggested_actions, Suggestion};
pub use versions::{latest_version, versions};

/// Separator between documents in a YAML stream
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Append a YAML document to a stream, starting a new document if the stream is not empty
pub(crate) fn push_document(stream: &mut String, document: &str) {
    if !stream.is_empty() {
        if !stream.ends_with('\n') {
            stream.push('\n');
        }
        stream.push_str(DOCUMENT_SEPARATOR);
    }
    stream.push_str(document);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_document_into_empty_stream() {
        let mut stream = String::new();
        push_document(&mut stream, "kind: A\n");
        assert_eq!(stream, "kind: A\n");
    }

    #[test]
    fn test_push_document_adds_separator_and_newline() {
        let mut stream = String::from("kind: A");
        push_document(&mut stream, "kind: B\n");
        push_document(&mut stream, "kind: C\n");
        assert_eq!(stream, "kind: A\n---\nkind: B\n---\nkind: C\n");
    }
}
