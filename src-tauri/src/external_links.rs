use std::process::{Command, Stdio};

use url::Url;

const WINDOWS_LAUNCHER_ARGS: &[&str] = &["url.dll,FileProtocolHandler"];

/// Program plus leading arguments that hand a URL to the desktop's default
/// browser. `None` where no launcher is known.
fn system_browser_launcher() -> Option<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "windows") {
        Some(("rundll32", WINDOWS_LAUNCHER_ARGS))
    } else if cfg!(target_os = "macos") {
        Some(("open", &[] as &[&str]))
    } else if cfg!(unix) {
        Some(("xdg-open", &[] as &[&str]))
    } else {
        None
    }
}

/// Only web links leave the game; anything else a page asks for is refused.
fn external_link_target(raw_url: &str) -> Result<Url, String> {
    let raw_url = raw_url.trim();
    if raw_url.is_empty() {
        return Err("new-window request carried no url".to_string());
    }

    let url = Url::parse(raw_url).map_err(|error| format!("unparseable url: {error}"))?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(url)
    } else {
        Err(format!("refusing '{}' link", url.scheme()))
    }
}

fn spawn_system_browser(url: &Url) -> Result<(), String> {
    let (program, leading_args) = system_browser_launcher()
        .ok_or_else(|| "no system browser launcher on this platform".to_string())?;

    Command::new(program)
        .args(leading_args)
        .arg(url.as_str())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("failed to run '{program}': {error}"))
}

/// Hands a URL the game tried to open in a new window to the OS browser.
pub(crate) fn open_external<F>(raw_url: &str, log: F)
where
    F: Fn(&str),
{
    match external_link_target(raw_url).and_then(|url| spawn_system_browser(&url)) {
        Ok(()) => log(&format!("opened external url: {raw_url}")),
        Err(error) => log(&format!("external url {raw_url} not opened: {error}")),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{external_link_target, open_external, system_browser_launcher};

    #[test]
    fn web_links_are_accepted() {
        assert!(external_link_target("https://discord.gg/voxiom").is_ok());
        assert_eq!(
            external_link_target(" http://example.com ").map(|url| url.to_string()),
            Ok("http://example.com/".to_string())
        );
    }

    #[test]
    fn non_web_schemes_are_refused() {
        assert_eq!(
            external_link_target("file:///etc/passwd"),
            Err("refusing 'file' link".to_string())
        );
        assert!(external_link_target("javascript:alert(1)").is_err());
    }

    #[test]
    fn blank_and_garbled_urls_are_refused() {
        assert_eq!(
            external_link_target("  "),
            Err("new-window request carried no url".to_string())
        );
        assert!(external_link_target("not a url")
            .expect_err("relative text rejected")
            .starts_with("unparseable url"));
    }

    #[test]
    fn refused_links_are_logged_without_spawning() {
        let lines = RefCell::new(Vec::new());
        open_external("ftp://mirror.example/file", |line| {
            lines.borrow_mut().push(line.to_string())
        });

        assert_eq!(
            lines.into_inner(),
            vec!["external url ftp://mirror.example/file not opened: refusing 'ftp' link"]
        );
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    #[test]
    fn linux_desktops_use_xdg_open() {
        assert_eq!(
            system_browser_launcher().map(|(program, _)| program),
            Some("xdg-open")
        );
    }
}
