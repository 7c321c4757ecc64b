//! Robots Policy: robots.txt parsing and longest-prefix-wins matching (spec §4.3).

use std::collections::HashMap;

/// One user-agent group's rule set.
#[derive(Debug, Clone, Default)]
struct RuleGroup {
    allow: Vec<String>,
    disallow: Vec<String>,
}

/// A fixed catalogue of well-known bots, grouped by the traffic category they
/// represent. Used only for the reporting mode in §4.3 — never to gate crawling.
const BOT_CATALOGUE: &[(&str, &str)] = &[
    ("Googlebot", "search"),
    ("Bingbot", "search"),
    ("Slurp", "search"),
    ("DuckDuckBot", "search"),
    ("Baiduspider", "search"),
    ("YandexBot", "search"),
    ("facebookexternalhit", "social"),
    ("Twitterbot", "social"),
    ("LinkedInBot", "social"),
    ("Pinterestbot", "social"),
    ("GPTBot", "ai"),
    ("ChatGPT-User", "ai"),
    ("CCBot", "ai"),
    ("anthropic-ai", "ai"),
    ("ClaudeBot", "ai"),
    ("PerplexityBot", "ai"),
    ("AhrefsBot", "seo-tool"),
    ("SemrushBot", "seo-tool"),
    ("MJ12bot", "seo-tool"),
    ("DotBot", "seo-tool"),
];

/// Parsed robots.txt for one effective base domain.
#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    groups: HashMap<String, RuleGroup>,
    /// Every `Sitemap:` directive found, in document order.
    pub sitemaps: Vec<String>,
}

/// A well-known bot's access classification for the reporting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotAccessStatus {
    /// No disallow rules apply to this bot.
    Allowed,
    /// Some, but not all, paths are disallowed.
    PartiallyBlocked,
    /// The bot's group (or the wildcard fallback) disallows `/` outright.
    Blocked,
}

/// One row of the bot-catalogue report.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BotAccessReport {
    /// The bot's user-agent token.
    pub name: String,
    /// The traffic category it belongs to.
    pub category: String,
    /// Its access classification.
    pub status: BotAccessStatus,
}

impl RobotsPolicy {
    /// Parses raw robots.txt content. Malformed lines are skipped silently;
    /// this never fails (§7: "partial parse accepted").
    pub fn parse(content: &str) -> Self {
        let mut groups: HashMap<String, RuleGroup> = HashMap::new();
        let mut sitemaps = Vec::new();
        let mut current_agents: Vec<String> = Vec::new();
        let mut collecting_agents = false;

        for raw_line in content.lines() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }
            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    if !collecting_agents {
                        current_agents.clear();
                    }
                    current_agents.push(value.to_lowercase());
                    collecting_agents = true;
                }
                "disallow" => {
                    collecting_agents = false;
                    if value.is_empty() {
                        continue;
                    }
                    for agent in &current_agents {
                        groups.entry(agent.clone()).or_default().disallow.push(value.to_string());
                    }
                }
                "allow" => {
                    collecting_agents = false;
                    if value.is_empty() {
                        continue;
                    }
                    for agent in &current_agents {
                        groups.entry(agent.clone()).or_default().allow.push(value.to_string());
                    }
                }
                "sitemap" => {
                    if let Ok(url) = url::Url::parse(value) {
                        if url.scheme() == "http" || url.scheme() == "https" {
                            sitemaps.push(value.to_string());
                        }
                    }
                }
                _ => {}
            }
        }

        Self { groups, sitemaps }
    }

    /// Finds the rule group that most specifically matches `user_agent`,
    /// falling back to the wildcard `*` group.
    fn group_for(&self, user_agent: &str) -> Option<&RuleGroup> {
        let ua_lower = user_agent.to_lowercase();
        self.groups
            .iter()
            .filter(|(name, _)| *name != "*" && ua_lower.contains(name.as_str()))
            .max_by_key(|(name, _)| name.len())
            .map(|(_, group)| group)
            .or_else(|| self.groups.get("*"))
    }

    /// Whether `path` is allowed for `user_agent`. Longest matching pattern
    /// wins; an empty or absent disallow list means everything is allowed.
    pub fn is_allowed(&self, path: &str, user_agent: &str) -> bool {
        let Some(group) = self.group_for(user_agent) else {
            return true;
        };

        let longest_disallow = group
            .disallow
            .iter()
            .filter(|p| path.starts_with(p.as_str()))
            .map(|p| p.len())
            .max();

        let Some(disallow_len) = longest_disallow else {
            return true;
        };

        let longest_allow = group
            .allow
            .iter()
            .filter(|p| path.starts_with(p.as_str()))
            .map(|p| p.len())
            .max()
            .unwrap_or(0);

        longest_allow < disallow_len
    }

    /// Reports access classification for the fixed well-known-bot catalogue
    /// (§4.3). Reporting only — never used to gate crawling.
    pub fn report_bot_access(&self) -> Vec<BotAccessReport> {
        BOT_CATALOGUE
            .iter()
            .map(|(name, category)| {
                let group = self.group_for(name);
                let status = match group {
                    None => BotAccessStatus::Allowed,
                    Some(group) if group.disallow.is_empty() => BotAccessStatus::Allowed,
                    Some(group) if group.disallow.iter().any(|p| p == "/") => {
                        BotAccessStatus::Blocked
                    }
                    Some(_) => BotAccessStatus::PartiallyBlocked,
                };
                BotAccessReport {
                    name: name.to_string(),
                    category: category.to_string(),
                    status,
                }
            })
            .collect()
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_disallow_allows_everything() {
        let policy = RobotsPolicy::parse("User-agent: *\nDisallow:\n");
        assert!(policy.is_allowed("/anything", "SEOCrawlerBot"));
    }

    #[test]
    fn disallow_prefix_blocks_matching_path() {
        let policy = RobotsPolicy::parse("User-agent: *\nDisallow: /private/\n");
        assert!(!policy.is_allowed("/private/b", "SEOCrawlerBot"));
        assert!(policy.is_allowed("/public/a", "SEOCrawlerBot"));
    }

    #[test]
    fn longest_prefix_allow_overrides_disallow() {
        let policy = RobotsPolicy::parse(
            "User-agent: *\nDisallow: /private/\nAllow: /private/shared/\n",
        );
        assert!(policy.is_allowed("/private/shared/doc", "SEOCrawlerBot"));
        assert!(!policy.is_allowed("/private/secret", "SEOCrawlerBot"));
    }

    #[test]
    fn specific_agent_group_overrides_wildcard() {
        let policy = RobotsPolicy::parse(
            "User-agent: *\nDisallow: /private/\n\nUser-agent: SEOCrawlerBot\nDisallow:\n",
        );
        assert!(policy.is_allowed("/private/b", "SEOCrawlerBot/1.0"));
        assert!(!policy.is_allowed("/private/b", "SomeOtherBot"));
    }

    #[test]
    fn grouped_agent_lines_share_rules() {
        let policy = RobotsPolicy::parse(
            "User-agent: Googlebot\nUser-agent: Bingbot\nDisallow: /no-index/\n",
        );
        assert!(!policy.is_allowed("/no-index/x", "Googlebot"));
        assert!(!policy.is_allowed("/no-index/x", "Bingbot"));
    }

    #[test]
    fn sitemap_directives_collected_case_insensitively() {
        let policy = RobotsPolicy::parse(
            "Sitemap: https://example.com/sitemap.xml\nsitemap: https://example.com/news.xml\n",
        );
        assert_eq!(policy.sitemaps.len(), 2);
    }

    #[test]
    fn no_matching_group_allows_everything() {
        let policy = RobotsPolicy::parse("");
        assert!(policy.is_allowed("/anything", "SEOCrawlerBot"));
    }

    #[test]
    fn bot_catalogue_reports_blocked_when_root_disallowed() {
        let policy = RobotsPolicy::parse("User-agent: GPTBot\nDisallow: /\n");
        let report = policy.report_bot_access();
        let gptbot = report.iter().find(|r| r.name == "GPTBot").unwrap();
        assert_eq!(gptbot.status, BotAccessStatus::Blocked);
    }

    #[test]
    fn bot_catalogue_reports_partially_blocked() {
        let policy = RobotsPolicy::parse("User-agent: AhrefsBot\nDisallow: /private/\n");
        let report = policy.report_bot_access();
        let ahrefs = report.iter().find(|r| r.name == "AhrefsBot").unwrap();
        assert_eq!(ahrefs.status, BotAccessStatus::PartiallyBlocked);
    }
}
