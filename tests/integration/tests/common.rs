//! Common test utilities and fixtures.

use std::path::PathBuf;

use samlsp_core::Saml2Config;
use tempfile::TempDir;

/// Entity ID used by the fixtures.
pub const SP_ID: &str = "https://sp.example/";

/// Transient NameID format URI.
pub const TRANSIENT: &str = "urn:oasis:names:tc:SAML:2.0:nameid-format:transient";

/// A configuration using every section.
pub const FULL_CONFIG: &str = r#"
[service_provider]
id = "https://sp.example/"
server = "https://sp.example/"

[service_provider.endpoints.sign_on]
binding = "post"
local_path = "/acs"

[service_provider.name_id_formats]
allow_create = true
formats = [{ format = "urn:oasis:names:tc:SAML:2.0:nameid-format:transient" }]

[service_provider.authentication_contexts]
comparison = "exact"
contexts = [
    { context = "urn:oasis:names:tc:SAML:2.0:ac:classes:PasswordProtectedTransport" },
    { context = "https://sp.example/loa2", reference_type = "AuthnContextDeclRef" },
]
"#;

/// Initializes test logging once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("samlsp_protocol=debug")
        .with_test_writer()
        .try_init();
}

/// Writes `content` to a configuration file in a fresh temporary directory.
pub fn write_config(content: &str) -> anyhow::Result<(TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("samlsp.toml");
    std::fs::write(&path, content)?;
    Ok((dir, path))
}

/// Loads `content` through the file loader.
pub fn load_config(content: &str) -> anyhow::Result<Saml2Config> {
    let (_dir, path) = write_config(content)?;
    Ok(Saml2Config::load(&path)?)
}
