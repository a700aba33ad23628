//! Page write command implementation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use pagepush_config::{CliSettings, Config};
use pagepush_confluence::{
    ConfluenceClient, ContentApi, DryRunResult, PageWriter, WriteRequest, WriteResult,
};
use pagepush_credentials::{
    ConsolePrompt, Credential, CredentialResolver, KeyringStore, PasswordPrompt, SecretStore,
};
use tracing::debug;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for writing a page.
#[derive(Args, Debug)]
pub(crate) struct WriteArgs {
    /// Confluence page ID to overwrite.
    page_id: u64,

    /// HTML string to write to the page.
    #[arg(conflicts_with = "file")]
    html: Option<String>,

    /// Username to log into Confluence (default: current OS user).
    #[arg(short, long)]
    user: Option<String>,

    /// New page title (default: keep the current title).
    #[arg(short, long)]
    title: Option<String>,

    /// Write the contents of FILE to the page.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Version message for the update.
    #[arg(short, long)]
    message: Option<String>,

    /// Confluence wiki base URL (overrides config).
    #[arg(long, env = "CONFLUENCE_URL")]
    base_url: Option<String>,

    /// HTTP timeout in seconds, 0 to wait indefinitely (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Forget the stored password and prompt for a new one.
    #[arg(long)]
    reset_password: bool,

    /// Show what would be written without updating Confluence.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover pagepush.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Where the new page body comes from.
#[derive(Debug, PartialEq, Eq)]
enum ContentSource<'a> {
    File(&'a Path),
    Inline(&'a str),
}

impl WriteArgs {
    /// Execute the write command.
    ///
    /// Content is loaded before any credential lookup or network access, so
    /// invalid input never reaches Confluence.
    ///
    /// # Errors
    ///
    /// Returns an error if the content, config, credentials, or write fail.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let html = self.load_content()?;

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        match &config.config_path {
            Some(path) => debug!(path = %path.display(), "Loaded config"),
            None => debug!("No config file found, using defaults"),
        }
        let conf = &config.confluence;
        let base_url = conf.require_base_url()?;

        let credential = self.resolve_credential(
            &KeyringStore,
            &ConsolePrompt::new(),
            &conf.keyring_service,
            conf.username.as_deref(),
        )?;

        let timeout = (conf.timeout_secs > 0).then(|| Duration::from_secs(conf.timeout_secs));
        let client = ConfluenceClient::new(
            base_url,
            &credential.username,
            &credential.password,
            timeout,
        );

        self.push(&client, &html, output)
    }

    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base_url: self.base_url.clone(),
            username: self.user.clone(),
            timeout_secs: self.timeout,
        }
    }

    /// Pick the content source, rejecting ambiguous or missing input.
    fn content_source(&self) -> Result<ContentSource<'_>, CliError> {
        match (&self.file, &self.html) {
            (Some(_), Some(_)) => Err(CliError::Validation(
                "can't specify both a file and immediate html to write to page".to_owned(),
            )),
            (Some(path), None) => Ok(ContentSource::File(path.as_path())),
            (None, Some(html)) => Ok(ContentSource::Inline(html.as_str())),
            (None, None) => Err(CliError::Validation(
                "nothing to write: pass HTML or --file".to_owned(),
            )),
        }
    }

    /// Load the page body. File contents are used verbatim.
    fn load_content(&self) -> Result<String, CliError> {
        match self.content_source()? {
            ContentSource::Inline(html) => Ok(html.to_owned()),
            ContentSource::File(path) => {
                debug!(path = %path.display(), "Reading page content");
                std::fs::read_to_string(path).map_err(|source| CliError::ReadContent {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    fn resolve_credential(
        &self,
        store: &dyn SecretStore,
        prompt: &dyn PasswordPrompt,
        service: &str,
        username: Option<&str>,
    ) -> Result<Credential, CliError> {
        let resolver = CredentialResolver::new(store, prompt, service);
        let credential = if self.reset_password {
            resolver.reset(username)?
        } else {
            resolver.resolve(username)?
        };
        Ok(credential)
    }

    fn write_request<'a>(&'a self, html: &'a str) -> WriteRequest<'a> {
        WriteRequest::new(html)
            .title(self.title.as_deref())
            .message(self.message.as_deref())
    }

    /// Read the page and write the new body (or preview it with `--dry-run`).
    fn push(&self, api: &dyn ContentApi, html: &str, output: &Output) -> Result<(), CliError> {
        let writer = PageWriter::new(api);
        let request = self.write_request(html);

        if self.dry_run {
            let result = writer.dry_run(self.page_id, &request)?;
            print_dry_run_result(output, &result);
        } else {
            let result = writer.write_page(self.page_id, &request)?;
            print_write_result(output, &result);
        }

        Ok(())
    }
}

fn print_dry_run_result(output: &Output, result: &DryRunResult) {
    output.highlight("\n[DRY RUN] No changes made.");
    output.info(&format!(
        "Current page: \"{}\" (v{})",
        result.current_title, result.current_version
    ));
    output.info(&format!(
        "Would write: \"{}\" (v{})",
        result.update.title, result.update.version.number
    ));
    match &result.parent_title {
        Some(parent) => output.info(&format!("Parent: {parent}")),
        None => output.warning("Page has no parent; update will be sent without ancestors."),
    }
    output.info(&format!(
        "Body: {} bytes",
        result.update.body.storage.value.len()
    ));
}

fn print_write_result(output: &Output, result: &WriteResult) {
    output.success(&format!(
        "Wrote '{}' version {}",
        result.page.title, result.page.version.number
    ));
    output.info(&format!("URL: {}", result.url));
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pagepush_confluence::MockContentApi;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        write: WriteArgs,
    }

    fn parse(args: &[&str]) -> Result<WriteArgs, clap::Error> {
        TestCli::try_parse_from(std::iter::once("pagepush").chain(args.iter().copied()))
            .map(|cli| cli.write)
    }

    fn api() -> MockContentApi {
        MockContentApi::new()
            .with_page(4242, "Team Notes", 9)
            .with_ancestors(
                4242,
                json!([
                    {"id": "1", "title": "Home"},
                    {"id": "7", "title": "Team", "_links": {}, "_expandable": {}, "extensions": {}}
                ]),
            )
    }

    #[test]
    fn test_parse_full_argument_surface() {
        let args = parse(&["-u", "jdoe", "-t", "New Title", "-f", "page.html", "4242"]).unwrap();
        assert_eq!(args.page_id, 4242);
        assert_eq!(args.user.as_deref(), Some("jdoe"));
        assert_eq!(args.title.as_deref(), Some("New Title"));
        assert_eq!(args.file, Some(PathBuf::from("page.html")));
        assert!(args.html.is_none());
    }

    #[test]
    fn test_parse_inline_html() {
        let args = parse(&["4242", "<p>hi</p>"]).unwrap();
        assert_eq!(args.html.as_deref(), Some("<p>hi</p>"));
        assert_eq!(
            args.content_source().unwrap(),
            ContentSource::Inline("<p>hi</p>")
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_page_id() {
        assert!(parse(&["not-a-page", "<p/>"]).is_err());
    }

    #[test]
    fn test_parse_rejects_file_and_html() {
        let err = parse(&["-f", "page.html", "4242", "<p>hi</p>"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_content_source_rejects_file_and_html() {
        let mut args = parse(&["4242", "<p>hi</p>"]).unwrap();
        args.file = Some(PathBuf::from("page.html"));

        let err = args.load_content().unwrap_err();

        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_content_source_requires_input() {
        let args = parse(&["4242"]).unwrap();
        let err = args.load_content().unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_file_content_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        let html = "<h1>Notes</h1>\r\n<p>tabs\tand trailing spaces   </p>\n\n\u{2014} end";
        std::fs::write(&path, html).unwrap();

        let args = parse(&["-f", path.to_str().unwrap(), "4242"]).unwrap();

        assert_eq!(args.load_content().unwrap().as_bytes(), html.as_bytes());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let args = parse(&["-f", "/nonexistent/page.html", "4242"]).unwrap();
        let err = args.load_content().unwrap_err();
        assert!(matches!(err, CliError::ReadContent { .. }));
        assert!(err.to_string().contains("/nonexistent/page.html"));
    }

    #[test]
    fn test_push_writes_next_version() {
        let api = api();
        let args = parse(&["4242", "<p>update</p>"]).unwrap();

        args.push(&api, "<p>update</p>", &Output::new()).unwrap();

        let puts = api.puts();
        assert_eq!(puts.len(), 1);
        let (page_id, update) = &puts[0];
        assert_eq!(*page_id, 4242);
        assert_eq!(update.version.number, 10);
        assert_eq!(update.title, "Team Notes");
        assert_eq!(
            serde_json::to_value(&update.ancestors).unwrap(),
            json!([{"id": "7", "title": "Team"}])
        );
    }

    #[test]
    fn test_push_applies_title_and_message() {
        let api = api();
        let args = parse(&["-t", "Renamed", "-m", "from CI", "4242", "<p/>"]).unwrap();

        args.push(&api, "<p/>", &Output::new()).unwrap();

        let puts = api.puts();
        let update = &puts[0].1;
        assert_eq!(update.title, "Renamed");
        assert_eq!(update.version.message.as_deref(), Some("from CI"));
    }

    #[test]
    fn test_push_dry_run_does_not_write() {
        let api = api();
        let args = parse(&["--dry-run", "4242", "<p/>"]).unwrap();

        args.push(&api, "<p/>", &Output::new()).unwrap();

        assert!(api.puts().is_empty());
        assert_eq!(api.page(4242).unwrap().version.number, 9);
    }

    #[test]
    fn test_push_surfaces_version_conflict() {
        let api = api().failing_writes(409);
        let args = parse(&["4242", "<p/>"]).unwrap();

        let err = args.push(&api, "<p/>", &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Write(_)));
    }

    #[test]
    fn test_resolve_credential_uses_cli_user() {
        use pagepush_credentials::{MemorySecretStore, ScriptedPrompt};

        let store = MemorySecretStore::new().with_secret("confluence_script", "jdoe", "pw");
        let prompt = ScriptedPrompt::new(Vec::<String>::new());
        let args = parse(&["-u", "jdoe", "4242", "<p/>"]).unwrap();

        let credential = args
            .resolve_credential(&store, &prompt, "confluence_script", Some("jdoe"))
            .unwrap();

        assert_eq!(credential.username, "jdoe");
        assert_eq!(credential.password, "pw");
        assert_eq!(prompt.prompt_count(), 0);
    }

    #[test]
    fn test_reset_password_prompts_again() {
        use pagepush_credentials::{MemorySecretStore, ScriptedPrompt};

        let store = MemorySecretStore::new().with_secret("confluence_script", "jdoe", "old");
        let prompt = ScriptedPrompt::new(["fresh"]);
        let args = parse(&["--reset-password", "4242", "<p/>"]).unwrap();

        let credential = args
            .resolve_credential(&store, &prompt, "confluence_script", Some("jdoe"))
            .unwrap();

        assert_eq!(credential.password, "fresh");
        assert_eq!(prompt.prompt_count(), 1);
        assert_eq!(store.write_count(), 1);
    }
}
