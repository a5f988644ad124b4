use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when
/// the variable is unset. Expansion runs before TOML parsing, so config
/// structs hold plain strings. Placeholders on comment lines are left
/// untouched.
pub fn expand_env(input: &str) -> Result<String, String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern is valid")
    });

    let mut output = String::with_capacity(input.len());
    let mut cursor = 0;

    for captures in re.captures_iter(input) {
        let placeholder = captures.get(0).expect("group 0 always present");
        output.push_str(&input[cursor..placeholder.start()]);
        cursor = placeholder.end();

        if on_comment_line(input, placeholder.start()) {
            output.push_str(placeholder.as_str());
            continue;
        }

        let var_name = &captures[1];
        match std::env::var(var_name) {
            Ok(value) => output.push_str(&value),
            Err(_) => match captures.get(2) {
                Some(fallback) => output.push_str(fallback.as_str()),
                None => return Err(format!("environment variable not found: `{var_name}`")),
            },
        }
    }

    output.push_str(&input[cursor..]);
    Ok(output)
}

/// Whether the byte at `pos` sits on a line whose first non-blank
/// character is `#`
fn on_comment_line(input: &str, pos: usize) -> bool {
    let line_start = input[..pos].rfind('\n').map_or(0, |i| i + 1);
    input[line_start..pos].trim_start().starts_with('#')
}
