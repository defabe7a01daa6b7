/// Chromium switches applied to every webview the shell creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserFlag {
    pub name: &'static str,
    pub value: Option<&'static str>,
}

const fn switch(name: &'static str) -> BrowserFlag {
    BrowserFlag { name, value: None }
}

const fn switch_with_value(name: &'static str, value: &'static str) -> BrowserFlag {
    BrowserFlag {
        name,
        value: Some(value),
    }
}

pub fn browser_flags(target_os: &str) -> Vec<BrowserFlag> {
    let mut flags = vec![
        switch("disable-frame-rate-limit"),
        switch("disable-gpu-vsync"),
        switch("enable-webgl2-compute-context"),
        switch("disable-accelerated-2d-canvas"),
    ];
    // Window capture needs the GPU in-process; other platforms break with it.
    if target_os == "windows" {
        flags.push(switch("in-process-gpu"));
    }
    flags.push(switch_with_value(
        "autoplay-policy",
        "no-user-gesture-required",
    ));
    flags.push(switch_with_value("use-angle", "gl"));
    flags
}

/// Space-separated command line form, e.g. `--use-angle=gl`.
pub fn browser_args(target_os: &str) -> String {
    browser_flags(target_os)
        .iter()
        .map(|flag| match flag.value {
            Some(value) => format!("--{}={}", flag.name, value),
            None => format!("--{}", flag.name),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
