use super::{Handler, HandlerContext, HandlerResult};
use crate::domain::entities::CommandKind;

pub const UNKNOWN_COMMAND_REPLY: &str = "Unknown command. Send /start to see commands.";

pub fn help_text() -> String {
    let mut help = "Workout Tracker Bot\n\nCommands:\n".to_string();
    for kind in CommandKind::ALL {
        if matches!(kind, CommandKind::Start | CommandKind::Help) {
            continue;
        }
        help.push_str(&format!("{} - {}\n", kind.usage(), kind.description()));
    }
    help
}

/// `/start` and `/help`
pub struct HelpHandler;

impl Handler for HelpHandler {
    fn handle(&self, _ctx: &HandlerContext<'_>, _args: &[String]) -> HandlerResult {
        Ok(help_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_usage() {
        let help = help_text();
        for usage in [
            "/signup username password",
            "/login username password",
            "/exercises",
            "/createworkout title",
            "/addexercise workout_id exercise_id sets reps weight",
            "/myworkouts",
            "/stats",
            "/logout",
        ] {
            assert!(help.contains(usage), "missing {}", usage);
        }
        assert_ne!(help, UNKNOWN_COMMAND_REPLY);
    }
}
