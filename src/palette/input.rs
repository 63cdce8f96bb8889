use crate::registry::CommandPath;

/// Prompt characters accepted in front of a command.
const PROMPTS: [char; 2] = [':', '>'];

/// A raw input line split into command path and argument tokens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInput {
    /// Path named by the first token.
    pub path: CommandPath,
    /// Remaining whitespace-separated tokens.
    pub args: Vec<String>,
}

/// Splits `line` into a dotted command path and arguments.
///
/// Surrounding whitespace and one leading prompt character (`:` or `>`)
/// are ignored. Returns `None` when no command token remains.
///
/// ```
/// use cmdpalette::palette::parse_input;
///
/// let input = parse_input(":git.commit -m fix").unwrap();
/// assert_eq!(input.path.to_string(), "git.commit");
/// assert_eq!(input.args, vec!["-m", "fix"]);
/// ```
pub fn parse_input(line: &str) -> Option<ParsedInput> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix(PROMPTS).unwrap_or(trimmed);

    let mut tokens = trimmed.split_whitespace();
    let first = tokens.next()?;

    Some(ParsedInput {
        path: CommandPath::parse(first),
        args: tokens.map(str::to_string).collect(),
    })
}
