//! Static test page

use anyhow::Result;
use provision::{Host, Step};
use std::path::PathBuf;

use super::permissions::FILE_MODE;

/// Served at the document root so the operator can check the install
/// from a browser.
pub const TEST_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Apache Test Page</title>
</head>
<body>
    <h1>Apache Web Server is Running!</h1>
    <p>Congratulations! Your Apache web server is successfully installed and running on Amazon Linux 2023.</p>
    <p>Server time: <script>document.write(new Date());</script></p>
</body>
</html>
"#;

/// Write the test page with the same owner and mode as the rest of the
/// web root, so later permission checks stay satisfied.
#[derive(Debug, Clone)]
pub struct TestPage {
    pub path: PathBuf,
    pub owner: String,
    pub contents: String,
}

impl TestPage {
    pub fn new(path: PathBuf, owner: String) -> Self {
        Self {
            path,
            owner,
            contents: TEST_PAGE_HTML.to_string(),
        }
    }
}

impl Step for TestPage {
    fn name(&self) -> String {
        "create-test-page".to_string()
    }

    fn description(&self) -> String {
        format!("Create test page {}", self.path.display())
    }

    fn command(&self) -> String {
        format!("write {} ({} bytes)", self.path.display(), self.contents.len())
    }

    fn check(&self, host: &dyn Host) -> Result<bool> {
        Ok(host.read_file(&self.path)?.as_deref() == Some(self.contents.as_str()))
    }

    fn action(&self, host: &dyn Host) -> Result<()> {
        host.write_file(&self.path, &self.contents)?;
        let path = self.path.to_string_lossy();
        host.run_checked("chown", &[self.owner.as_str(), &path])?;
        host.run_checked("chmod", &[FILE_MODE, &path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    fn page() -> TestPage {
        TestPage::new(
            PathBuf::from("/var/www/html/index.html"),
            "ec2-user:apache".to_string(),
        )
    }

    #[test]
    fn test_page_converges() {
        let host = FakeHost::fresh().with_installed();
        assert!(!page().check(&host).unwrap());

        page().action(&host).unwrap();

        assert!(page().check(&host).unwrap());
        assert_eq!(
            host.mutations(),
            vec![
                "write /var/www/html/index.html",
                "chown ec2-user:apache /var/www/html/index.html",
                "chmod 0664 /var/www/html/index.html"
            ]
        );
    }

    #[test]
    fn test_different_content_is_rewritten() {
        let host = FakeHost::fresh()
            .with_installed()
            .with_file(&PathBuf::from("/var/www/html/index.html"), "<h1>old</h1>");
        assert!(!page().check(&host).unwrap());
    }

    #[test]
    fn test_page_mentions_apache() {
        assert!(TEST_PAGE_HTML.contains("Apache Web Server is Running!"));
    }
}
