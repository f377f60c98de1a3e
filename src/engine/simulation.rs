//! Simulated terminal for learning-module tasks
//!
//! Input is trimmed and lower-cased, then matched against the current task's
//! literal solution, a handful of meta commands and some canned tool output.
//! Nothing is actually executed.

use super::catalog::{LearningModule, SkillLevel, Task, TaskVariant};
use std::collections::BTreeSet;

pub const TASK_COMPLETED: &str = "✅ Task completed successfully!";
pub const NOT_RECOGNIZED: &str = "Command not recognized or incomplete. Type 'help' for available commands.";
pub const NO_HINTS: &str = "No hints available for advanced difficulty.";
pub const HASH_USAGE: &str = "Usage: hash <string> <algorithm>";

const HELP: &str = "Available commands:
- help: Show this help message
- hint: Get a hint for the current task
- task: Show current task details
- clear: Clear the terminal
- exit: Return to module page";

const SUSPICIOUS_EMAIL: &str = "
From: security@bankofamerica-secure.com
To: user@example.com
Subject: URGENT: Your Account Has Been Compromised

Dear Valued Customer,

We have detected suspicious activity on your account. Your account may have been compromised.

Please click the link below to verify your identity and secure your account immediately:
https://bankofamerica-secure.verify-now.com/login

This is urgent and requires your immediate attention to prevent unauthorized transactions.

Bank of America Security Team
";

const EMAIL_HEADERS: &str = "
Received: from mail.secure-server.com (unknown [192.168.1.100])
    by mail.example.com (Postfix) with ESMTP id 123ABC
    for <user@example.com>; Mon, 15 Mar 2023 10:22:33 -0700 (PDT)
From: \"Bank of America Security\" <security@bankofamerica-secure.com>
Reply-To: security@bankofamerica-secure.com
To: user@example.com
Message-ID: <fake-id-12345@phishing-server.com>
Subject: URGENT: Your Account Has Been Compromised
Date: Mon, 15 Mar 2023 10:22:30 -0700
MIME-Version: 1.0
Content-Type: text/html; charset=UTF-8
X-Mailer: PHPMailer 6.0.2 (https://github.com/PHPMailer/PHPMailer)
X-Spam-Status: Yes, score=8.5
";

const NETWORK_SCAN: &str = "
Scanning network 192.168.1.0/24...
Found 8 active hosts:

192.168.1.1 - Router [Ports: 80(http), 443(https), 22(ssh)]
192.168.1.10 - Server [Ports: 22(ssh), 80(http), 443(https), 3306(mysql)]
192.168.1.20 - Workstation [Ports: 445(smb)]
192.168.1.30 - Workstation [Ports: 445(smb)]
192.168.1.50 - Printer [Ports: 9100(printer), 80(http)]
192.168.1.100 - Unknown [Ports: 22(ssh), 21(ftp), 25(smtp)]
192.168.1.150 - Workstation [Ports: 445(smb)]
192.168.1.200 - Server [Ports: 22(ssh), 80(http), 443(https)]

Scan complete.
";

/// What one command did to the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Lines appended to the terminal
    pub output: Vec<String>,
    /// Task newly solved by this command
    pub completed_task: Option<u32>,
    pub exit: bool,
}

impl CommandResult {
    fn lines(output: Vec<String>) -> Self {
        Self { output, ..Self::default() }
    }
}

/// A terminal session for one module at one skill level
#[derive(Debug, Clone)]
pub struct SimulationSession {
    module: LearningModule,
    level: SkillLevel,
    current: usize,
    completed: BTreeSet<u32>,
    history: Vec<String>,
}

impl SimulationSession {
    pub fn new(module: LearningModule, level: SkillLevel) -> Self {
        Self {
            module,
            level,
            current: 0,
            completed: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    /// Resume with tasks finished in an earlier session
    pub fn with_completed(mut self, task_ids: impl IntoIterator<Item = u32>) -> Self {
        self.completed.extend(task_ids);
        self
    }

    pub fn module(&self) -> &LearningModule {
        &self.module
    }

    pub fn level(&self) -> SkillLevel {
        self.level
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_task(&self) -> Option<&Task> {
        self.module.tasks.get(self.current)
    }

    fn current_variant(&self) -> Option<&TaskVariant> {
        self.current_task().map(|t| t.variant(self.level))
    }

    pub fn is_completed(&self, task_id: u32) -> bool {
        self.completed.contains(&task_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Share of the module's tasks solved, 0-100
    pub fn progress_percent(&self) -> u8 {
        let total = self.module.tasks.len();
        if total == 0 {
            return 0;
        }
        (self.completed.len() * 100 / total).min(100) as u8
    }

    pub fn next_task(&mut self) -> bool {
        if self.current + 1 >= self.module.tasks.len() {
            return false;
        }
        self.current += 1;
        self.history.clear();
        true
    }

    pub fn previous_task(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.history.clear();
        true
    }

    /// Run one command line
    pub fn submit(&mut self, command: &str) -> CommandResult {
        let input = command.trim().to_lowercase();
        let (task_id, variant) = match (self.current_task(), self.current_variant()) {
            (Some(task), Some(variant)) => (task.id, variant.clone()),
            _ => return CommandResult::lines(vec![NOT_RECOGNIZED.to_string()]),
        };

        let result = if input == variant.solution.to_lowercase() {
            let mut result = CommandResult::lines(vec![TASK_COMPLETED.to_string()]);
            if self.completed.insert(task_id) {
                result.completed_task = Some(task_id);
            }
            result
        } else {
            match input.as_str() {
                "help" => CommandResult::lines(vec![HELP.to_string()]),
                "hint" => match variant.hints.first() {
                    Some(hint) => CommandResult::lines(vec![format!("Hint: {}", hint)]),
                    None => CommandResult::lines(vec![NO_HINTS.to_string()]),
                },
                "task" => CommandResult::lines(vec![self.describe_current()]),
                "clear" => {
                    self.history.clear();
                    return CommandResult::default();
                }
                "exit" => {
                    return CommandResult {
                        exit: true,
                        ..CommandResult::default()
                    }
                }
                _ => canned_output(&input, command),
            }
        };

        self.history.push(format!("$ {}", command));
        self.history.extend(result.output.iter().cloned());
        result
    }

    fn describe_current(&self) -> String {
        match (self.current_task(), self.current_variant()) {
            (Some(task), Some(variant)) => format!(
                "Current Task: {}\n{}\n\nInstructions: {}",
                task.title, task.description, variant.instructions
            ),
            _ => String::new(),
        }
    }
}

fn canned_output(input: &str, raw: &str) -> CommandResult {
    if input.starts_with("analyze-email") {
        return CommandResult::lines(vec![SUSPICIOUS_EMAIL.to_string()]);
    }
    if input.starts_with("show-headers") {
        return CommandResult::lines(vec![EMAIL_HEADERS.to_string()]);
    }
    if input.starts_with("scan-network") {
        return CommandResult::lines(vec![NETWORK_SCAN.to_string()]);
    }
    if input.starts_with("hash") {
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.len() >= 3 && parts[1] == "password" {
            let digest = match parts[2] {
                "md5" => Some("MD5 hash of 'password': 5f4dcc3b5aa765d61d8327deb882cf99"),
                "sha256" => Some("SHA-256 hash of 'password': 5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"),
                "sha512" => Some("SHA-512 hash of 'password': b109f3bbbc244eb82441917ed06d618b9008dd09b3befd1b5e07394c706a8bb980b1d7785e5976ec049b46df5f1326af5a2ea6d103fd07c95385ffab0cacbc86"),
                _ => None,
            };
            return CommandResult::lines(digest.into_iter().map(str::to_string).collect());
        }
        return CommandResult::lines(vec![HASH_USAGE.to_string()]);
    }
    CommandResult::lines(vec![format!("Executing: {}", raw), NOT_RECOGNIZED.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::module;

    fn session(id: &str, level: SkillLevel) -> SimulationSession {
        SimulationSession::new(module(id).unwrap(), level)
    }

    #[test]
    fn solution_match_ignores_case_and_padding() {
        let mut sim = session("crypto", SkillLevel::Beginner);
        sim.next_task();
        let result = sim.submit("  HASH Password MD5 ");
        assert_eq!(result.output, vec![TASK_COMPLETED.to_string()]);
        assert_eq!(result.completed_task, Some(2));

        let again = sim.submit("hash password md5");
        assert_eq!(again.completed_task, None);
        assert_eq!(sim.progress_percent(), 33);
    }

    #[test]
    fn hash_outside_the_solution_prints_digests() {
        let mut sim = session("crypto", SkillLevel::Beginner);
        let out = sim.submit("hash password sha256").output;
        assert!(out[0].starts_with("SHA-256 hash of 'password': 5e8848"));
        assert_eq!(sim.submit("hash secret").output, vec![HASH_USAGE.to_string()]);
        assert!(sim.submit("hash password crc32").output.is_empty());
    }

    #[test]
    fn hints_depend_on_level() {
        let mut beginner = session("network", SkillLevel::Beginner);
        assert_eq!(beginner.submit("hint").output, vec!["Hint: Try the 192.168.1.0/24 subnet".to_string()]);
        let mut advanced = session("network", SkillLevel::Advanced);
        assert_eq!(advanced.submit("hint").output, vec![NO_HINTS.to_string()]);
    }

    #[test]
    fn unknown_commands_echo_then_fail() {
        let mut sim = session("phishing", SkillLevel::Intermediate);
        let out = sim.submit("rm -rf /").output;
        assert_eq!(out, vec!["Executing: rm -rf /".to_string(), NOT_RECOGNIZED.to_string()]);
        assert_eq!(sim.history()[0], "$ rm -rf /");
    }

    #[test]
    fn navigation_and_meta_commands() {
        let mut sim = session("phishing", SkillLevel::Beginner);
        assert!(!sim.previous_task());
        assert!(sim.submit("analyze-email").output[0].contains("URGENT"));
        assert!(sim.submit("task").output[0].starts_with("Current Task: Identify Phishing Email"));
        assert!(sim.next_task());
        assert!(sim.history().is_empty());
        assert!(sim.next_task());
        assert!(!sim.next_task());

        sim.submit("help");
        sim.submit("clear");
        assert!(sim.history().is_empty());
        assert!(sim.submit("exit").exit);
    }
}
