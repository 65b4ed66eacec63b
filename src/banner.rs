// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    // Using a raw string literal for the multi-line banner
    let banner = r#"
                           _            _          _
  ___ ___ ___ _| |___    _| |_ ___ _ _|_|___| |_
 | . |  _| .'| . | -_|  | .'|_ -|_ -| |_ -|  _|
 |_  |_| |__,|___|___|  |__,|___|___|_|___|_|
 |___|

    AI Essay Grading & Feedback Service
"#;
    println!("{}", banner);
}
