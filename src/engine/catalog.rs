//! Learning module catalog
//!
//! Each module has three tasks, and every task has a beginner, intermediate and
//! advanced variant with its own instructions, hints and literal solution.

use crate::AcademyError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Difficulty level of a simulation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [SkillLevel::Beginner, SkillLevel::Intermediate, SkillLevel::Advanced];

    pub fn name(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl FromStr for SkillLevel {
    type Err = AcademyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            other => Err(AcademyError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a task asks for at one skill level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskVariant {
    pub instructions: &'static str,
    pub hints: Vec<&'static str>,
    pub solution: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub beginner: TaskVariant,
    pub intermediate: TaskVariant,
    pub advanced: TaskVariant,
}

impl Task {
    pub fn variant(&self, level: SkillLevel) -> &TaskVariant {
        match level {
            SkillLevel::Beginner => &self.beginner,
            SkillLevel::Intermediate => &self.intermediate,
            SkillLevel::Advanced => &self.advanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningModule {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub overview: &'static str,
    pub objectives: Vec<&'static str>,
    pub tasks: Vec<Task>,
}

impl LearningModule {
    pub fn total_tasks(&self) -> u32 {
        self.tasks.len() as u32
    }
}

fn variant(instructions: &'static str, hints: &[&'static str], solution: &'static str) -> TaskVariant {
    TaskVariant {
        instructions,
        hints: hints.to_vec(),
        solution,
    }
}

/// Look a module up by id
pub fn module(id: &str) -> Option<LearningModule> {
    match id {
        "phishing" => Some(phishing_module()),
        "network" => Some(network_module()),
        "crypto" => Some(crypto_module()),
        _ => None,
    }
}

/// Like [`module`], but an unknown id is an error
pub fn require_module(id: &str) -> crate::Result<LearningModule> {
    module(id).ok_or_else(|| AcademyError::ModuleNotFound(id.to_string()).into())
}

pub fn all_modules() -> Vec<LearningModule> {
    vec![phishing_module(), network_module(), crypto_module()]
}

fn phishing_module() -> LearningModule {
    LearningModule {
        id: "phishing",
        title: "Phishing Awareness",
        description: "Learn to identify and defend against phishing attacks",
        overview: "Phishing attacks are one of the most common and effective methods used by cybercriminals to steal sensitive information. This module will teach you how to identify and respond to phishing attempts.",
        objectives: vec![
            "Identify common indicators of phishing emails",
            "Analyze email headers to trace the origin of suspicious messages",
            "Develop proper response procedures for suspected phishing attempts",
        ],
        tasks: vec![
            Task {
                id: 1,
                title: "Identify Phishing Email",
                description: "Analyze the provided email and identify phishing indicators",
                beginner: variant(
                    "Run 'analyze-email' to view the suspicious email, then use 'identify-indicators' to list the phishing signs you found.",
                    &["Check the sender's email address", "Look for urgency in the message", "Examine the URL in the email"],
                    "identify-indicators sender-address url-mismatch urgency spelling-errors",
                ),
                intermediate: variant(
                    "Run 'analyze-email' to view the suspicious email, then use 'identify-indicators' to list all phishing signs.",
                    &["Check for technical inconsistencies"],
                    "identify-indicators sender-address url-mismatch urgency spelling-errors request-credentials",
                ),
                advanced: variant(
                    "Run 'analyze-email' to view the suspicious email, then use 'identify-indicators' with all phishing signs without hints.",
                    &[],
                    "identify-indicators sender-address url-mismatch urgency spelling-errors request-credentials spoofed-domain",
                ),
            },
            Task {
                id: 2,
                title: "Email Header Analysis",
                description: "Examine email headers to trace the origin of a phishing attempt",
                beginner: variant(
                    "Run 'show-headers' to view the email headers, then use 'trace-origin' to identify the true source.",
                    &["Look at the 'Received:' fields", "Check for IP addresses that don't match the claimed sender"],
                    "trace-origin 192.168.1.100",
                ),
                intermediate: variant(
                    "Run 'show-headers' to view the email headers, then use 'trace-origin' with the source IP and country code.",
                    &["Use 'geolocate' to find the country code"],
                    "trace-origin 192.168.1.100 RU",
                ),
                advanced: variant(
                    "Analyze the headers with 'show-headers' and use 'full-trace' to map the complete path of the email.",
                    &[],
                    "full-trace 192.168.1.100 RU 103.45.67.89 CN",
                ),
            },
            Task {
                id: 3,
                title: "Secure Response",
                description: "Practice the proper response to a suspected phishing attempt",
                beginner: variant(
                    "Use 'respond-to-phishing' with the appropriate actions to take.",
                    &["Don't click links", "Report to IT security", "Don't reply to the sender"],
                    "respond-to-phishing report-to-security do-not-click do-not-reply",
                ),
                intermediate: variant(
                    "Create a complete security response plan using 'create-response-plan'.",
                    &["Include user education"],
                    "create-response-plan report-to-security do-not-click do-not-reply isolate-system update-filters",
                ),
                advanced: variant(
                    "Implement a full organizational response with 'org-response'.",
                    &[],
                    "org-response report-to-security do-not-click do-not-reply isolate-system update-filters company-alert forensic-analysis",
                ),
            },
        ],
    }
}

fn network_module() -> LearningModule {
    LearningModule {
        id: "network",
        title: "Network Security",
        description: "Understand network vulnerabilities and implement protections",
        overview: "Network security is essential for protecting organizational infrastructure from unauthorized access and attacks. This module covers fundamental network security concepts and practical defense techniques.",
        objectives: vec![
            "Perform network scanning to identify potential vulnerabilities",
            "Configure firewall rules to protect against unauthorized access",
            "Set up and test intrusion detection systems",
        ],
        tasks: vec![
            Task {
                id: 1,
                title: "Network Scanning",
                description: "Scan a network to identify active hosts and open ports",
                beginner: variant(
                    "Use 'scan-network' to identify active hosts on the subnet.",
                    &["Try the 192.168.1.0/24 subnet", "Look for hosts with port 22 open"],
                    "scan-network 192.168.1.0/24",
                ),
                intermediate: variant(
                    "Perform a comprehensive port scan on the target host.",
                    &["Use scan-ports with the target IP"],
                    "scan-ports 192.168.1.10 --all",
                ),
                advanced: variant(
                    "Conduct a stealth scan and identify service versions.",
                    &[],
                    "stealth-scan 192.168.1.10 --service-detection",
                ),
            },
            Task {
                id: 2,
                title: "Firewall Configuration",
                description: "Configure a firewall to protect against unauthorized access",
                beginner: variant(
                    "Use 'configure-firewall' to block incoming connections to port 23 (telnet).",
                    &["Block incoming traffic", "Specify port 23"],
                    "configure-firewall --block incoming --port 23",
                ),
                intermediate: variant(
                    "Create a firewall rule to allow only specific IPs to access SSH.",
                    &["Allow only from trusted networks"],
                    "configure-firewall --allow incoming --port 22 --source 10.0.0.0/8",
                ),
                advanced: variant(
                    "Implement a complete firewall ruleset for a web server.",
                    &[],
                    "configure-firewall --ruleset webserver --allow incoming --port 80,443 --rate-limit 100/min --block incoming --port 0-79,81-442,444-65535",
                ),
            },
            Task {
                id: 3,
                title: "Intrusion Detection",
                description: "Set up and test an intrusion detection system",
                beginner: variant(
                    "Use 'setup-ids' to configure basic intrusion detection.",
                    &["Enable signature-based detection", "Monitor port 80"],
                    "setup-ids --mode signature --monitor-port 80",
                ),
                intermediate: variant(
                    "Configure IDS with custom rules and test with simulated attack.",
                    &["Add rules for SQL injection detection"],
                    "setup-ids --mode hybrid --add-rule sql-injection --test-detection",
                ),
                advanced: variant(
                    "Implement a comprehensive IDS/IPS system with automated responses.",
                    &[],
                    "setup-ids --mode advanced --behavior-analysis --auto-response --add-rule sql-injection,xss,csrf --log-level verbose",
                ),
            },
        ],
    }
}

fn crypto_module() -> LearningModule {
    LearningModule {
        id: "crypto",
        title: "Cryptography Basics",
        description: "Learn encryption fundamentals and secure communications",
        overview: "Cryptography is the foundation of secure digital communications. This module introduces you to encryption concepts, hash functions, and secure communication protocols.",
        objectives: vec![
            "Understand and apply basic encryption and decryption techniques",
            "Learn about cryptographic hash functions and their security implications",
            "Set up secure communication channels using modern protocols",
        ],
        tasks: vec![
            Task {
                id: 1,
                title: "Encryption Basics",
                description: "Practice basic encryption and decryption techniques",
                beginner: variant(
                    "Use 'encrypt' to encrypt the message 'secret' with the key 'key123'.",
                    &["Specify the algorithm as AES", "Format: encrypt <message> <key> <algorithm>"],
                    "encrypt secret key123 aes",
                ),
                intermediate: variant(
                    "Encrypt a message with AES-256 and then decrypt it.",
                    &["Use decrypt after encryption"],
                    "encrypt 'confidential data' strong-key-123 aes-256 && decrypt <encrypted-output> strong-key-123 aes-256",
                ),
                advanced: variant(
                    "Implement asymmetric encryption with RSA key generation and message exchange.",
                    &[],
                    "generate-keypair rsa 2048 && encrypt-asymmetric 'top secret' public.key && decrypt-asymmetric <encrypted-output> private.key",
                ),
            },
            Task {
                id: 2,
                title: "Hash Functions",
                description: "Understand and use cryptographic hash functions",
                beginner: variant(
                    "Generate an MD5 hash of the string 'password'.",
                    &["Use the hash command", "Specify MD5 as the algorithm"],
                    "hash password md5",
                ),
                intermediate: variant(
                    "Compare the security of different hash algorithms by generating multiple hashes.",
                    &["Try SHA-256 and SHA-512"],
                    "hash password md5 && hash password sha256 && hash password sha512 && compare-hashes",
                ),
                advanced: variant(
                    "Demonstrate a hash collision in MD5 and explain why it's insecure.",
                    &[],
                    "find-collision md5 && explain-vulnerability md5-collision",
                ),
            },
            Task {
                id: 3,
                title: "Secure Communication",
                description: "Set up a secure communication channel",
                beginner: variant(
                    "Establish a secure connection using 'secure-connect' with TLS.",
                    &["Specify the protocol as TLS", "Use port 443"],
                    "secure-connect --protocol tls --port 443",
                ),
                intermediate: variant(
                    "Configure perfect forward secrecy in your TLS connection.",
                    &["Add the PFS option"],
                    "secure-connect --protocol tls --port 443 --cipher ECDHE-RSA-AES256-GCM-SHA384 --pfs",
                ),
                advanced: variant(
                    "Implement a complete secure messaging system with end-to-end encryption.",
                    &[],
                    "setup-e2ee --protocol signal --generate-keys --authenticate-recipient --establish-session --send-message 'This is secure' --verify-delivery",
                ),
            },
        ],
    }
}
