/// Extracts `--name value` and `--flag` pairs from raw tokens.
///
/// A `--` token takes the next token as its value unless that token is
/// itself an option, in which case the value is the literal `"true"`.
/// Tokens that are not options are skipped. A repeated option keeps its
/// first position and its last value.
pub fn extract_options(args: &[String]) -> Vec<(String, String)> {
    let mut options: Vec<(String, String)> = Vec::new();
    let mut index = 0;

    while index < args.len() {
        let token = &args[index];
        index += 1;

        let Some(name) = token.strip_prefix("--") else {
            continue;
        };

        let value = match args.get(index) {
            Some(next) if !next.starts_with("--") => {
                index += 1;
                next.clone()
            }
            _ => "true".to_string(),
        };

        match options.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = value,
            None => options.push((name.to_string(), value)),
        }
    }

    options
}
