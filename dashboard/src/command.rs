//! Commands understood by the terminal front end

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the analysis
    Run,
    /// Show the member tree with this number, counting from one
    Tree(usize),
    Help,
    Quit,
    /// Nothing entered
    Empty,
    /// Anything else, with the reason
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some(word) => word.to_lowercase(),
            None => return Command::Empty,
        };
        let argument = words.next();
        if words.next().is_some() {
            return Command::Invalid(format!("too many arguments to '{}'", command));
        }

        match (command.as_str(), argument) {
            ("run", None) => Command::Run,
            ("tree", Some(index)) => match index.parse::<usize>() {
                Ok(index) => Command::Tree(index),
                Err(_) => Command::Invalid(format!("'{}' is not a tree number", index)),
            },
            ("tree", None) => Command::Invalid("usage: tree <n>".to_string()),
            ("help", None) => Command::Help,
            ("quit", None) | ("exit", None) => Command::Quit,
            _ => Command::Invalid(format!("unknown command '{}', try 'help'", line.trim())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  run        load the dataset and run the analysis
  tree <n>   show member tree n of the trained forest
  help       show this help
  quit       leave the dashboard";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("run"), Command::Run);
        assert_eq!(Command::parse("  TREE 7 "), Command::Tree(7));
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse(""), Command::Empty);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(Command::parse("tree"), Command::Invalid(_)));
        assert!(matches!(Command::parse("tree satu"), Command::Invalid(_)));
        assert!(matches!(Command::parse("tree -1"), Command::Invalid(_)));
        assert!(matches!(Command::parse("run now"), Command::Invalid(_)));
        assert!(matches!(Command::parse("plot"), Command::Invalid(_)));
    }
}
