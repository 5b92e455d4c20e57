//! Built-in keyword set for the relevance filter.

/// Default keywords, focused on digital and workflow automation.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    // Digital and workflow automation
    "workflow automation",
    "process automation",
    "digital automation",
    "robotic process automation",
    "rpa",
    "hyperautomation",
    "no-code automation",
    "low-code",
    "business process automation",
    "intelligent automation",
    "document automation",
    "task automation",
    // AI and tooling
    "ai automation",
    "digital twins",
    "automation tools",
    "agentic",
    "ai agent",
    "automation platform",
    "workflow management",
    // General terms
    "automation",
    "automate",
    "automated",
    "automating",
    // Workplace terms
    "productivity automation",
    "office automation",
    "email automation",
    "data automation",
    "automation software",
    "citizen developer",
];
