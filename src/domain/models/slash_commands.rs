#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /scope (/s) [SCOPE] - Switches the data scope, e.g. `/scope 10-A` or `/scope School`. Starts a fresh conversation.
- /scopes - Lists all available scopes.
- /quit /exit (/q) - Exit Praxis.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Enter - Send your question.
- Shift+Enter - Insert a new line.
- Tab - Switch to the next scope.
- F1-F4 - Ask one of the suggested questions (only before your first question).
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }

        let prefix = args.remove(0);
        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit() || cmd.is_scope_set() || cmd.is_scope_list() || cmd.is_help() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_scope_set(&self) -> bool {
        return ["/s", "/scope"].contains(&self.command.as_str());
    }

    pub fn is_scope_list(&self) -> bool {
        return self.command == "/scopes";
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    /// Argument of `/scope`, rejoined so names with spaces survive.
    pub fn scope_arg(&self) -> Option<String> {
        if self.args.is_empty() {
            return None;
        }

        return Some(self.args.join(" "));
    }
}
