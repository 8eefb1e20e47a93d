use crate::global_constants;

pub fn local_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

/// Opens `url` in the default browser. Failing to do so is not fatal; the
/// operator is told where to point a browser instead.
pub fn open_in_browser(url: &str) -> bool {
    match open::that(url) {
        Ok(()) => {
            log::info!("{} Opened {}", global_constants::LOG_TAG_BROWSER, url);
            true
        }
        Err(error) => {
            log::warn!(
                "{} Unable to open browser: {}",
                global_constants::LOG_TAG_BROWSER,
                error
            );
            println!("Unable to open browser. Please visit {} in your browser", url);
            false
        }
    }
}
