// Icon Catalog
// Named logos grouped by category, with search

use crate::models::{IconCategory, IconEntry};

const fn icon(name: &'static str, display: &'static str) -> IconEntry {
    IconEntry { name, display }
}

const POPULAR: &[IconEntry] = &[
    icon("github", "GitHub"),
    icon("npm", "NPM"),
    icon("docker", "Docker"),
    icon("javascript", "JavaScript"),
    icon("python", "Python"),
    icon("node-dot-js", "Node.js"),
    icon("react", "React"),
    icon("vue-dot-js", "Vue.js"),
    icon("angular", "Angular"),
    icon("typescript", "TypeScript"),
    icon("java", "Java"),
    icon("go", "Go"),
    icon("rust", "Rust"),
    icon("php", "PHP"),
    icon("ruby", "Ruby"),
    icon("swift", "Swift"),
];

const TECH: &[IconEntry] = &[
    icon("kubernetes", "Kubernetes"),
    icon("terraform", "Terraform"),
    icon("jenkins", "Jenkins"),
    icon("gitlab", "GitLab"),
    icon("circleci", "CircleCI"),
    icon("travis-ci", "Travis CI"),
    icon("apache", "Apache"),
    icon("nginx", "Nginx"),
    icon("redis", "Redis"),
    icon("mongodb", "MongoDB"),
    icon("mysql", "MySQL"),
    icon("postgresql", "PostgreSQL"),
    icon("elasticsearch", "Elasticsearch"),
    icon("grafana", "Grafana"),
    icon("prometheus", "Prometheus"),
    icon("ansible", "Ansible"),
];

const SOCIAL: &[IconEntry] = &[
    icon("twitter", "Twitter"),
    icon("linkedin", "LinkedIn"),
    icon("facebook", "Facebook"),
    icon("instagram", "Instagram"),
    icon("youtube", "YouTube"),
    icon("discord", "Discord"),
    icon("slack", "Slack"),
    icon("telegram", "Telegram"),
    icon("whatsapp", "WhatsApp"),
    icon("reddit", "Reddit"),
    icon("stackoverflow", "Stack Overflow"),
    icon("medium", "Medium"),
    icon("dev-dot-to", "Dev.to"),
    icon("hashnode", "Hashnode"),
];

const TOOLS: &[IconEntry] = &[
    icon("visual-studio-code", "VS Code"),
    icon("intellij-idea", "IntelliJ IDEA"),
    icon("sublime-text", "Sublime Text"),
    icon("atom", "Atom"),
    icon("vim", "Vim"),
    icon("emacs", "Emacs"),
    icon("git", "Git"),
    icon("figma", "Figma"),
    icon("sketch", "Sketch"),
    icon("adobe-photoshop", "Photoshop"),
    icon("postman", "Postman"),
    icon("insomnia", "Insomnia"),
    icon("jira", "Jira"),
    icon("notion", "Notion"),
    icon("confluence", "Confluence"),
];

const BRANDS: &[IconEntry] = &[
    icon("microsoft", "Microsoft"),
    icon("google", "Google"),
    icon("amazon", "Amazon"),
    icon("apple", "Apple"),
    icon("netflix", "Netflix"),
    icon("spotify", "Spotify"),
    icon("adobe", "Adobe"),
    icon("atlassian", "Atlassian"),
    icon("jetbrains", "JetBrains"),
    icon("digitalocean", "DigitalOcean"),
    icon("heroku", "Heroku"),
    icon("vercel", "Vercel"),
    icon("netlify", "Netlify"),
    icon("cloudflare", "Cloudflare"),
];

pub fn list(category: IconCategory) -> &'static [IconEntry] {
    match category {
        IconCategory::Popular => POPULAR,
        IconCategory::Tech => TECH,
        IconCategory::Social => SOCIAL,
        IconCategory::Tools => TOOLS,
        IconCategory::Brands => BRANDS,
    }
}

/// Case-insensitive match on slug or display name; an empty term returns the whole category
pub fn search(category: IconCategory, term: &str) -> Vec<IconEntry> {
    let term = term.trim().to_lowercase();
    list(category)
        .iter()
        .filter(|entry| {
            term.is_empty()
                || entry.name.to_lowercase().contains(&term)
                || entry.display.to_lowercase().contains(&term)
        })
        .copied()
        .collect()
}

/// Find a slug in any category
pub fn find(name: &str) -> Option<(IconCategory, IconEntry)> {
    IconCategory::ALL.iter().find_map(|&category| {
        list(category)
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| (category, *entry))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_matches_display_name() {
        let results = search(IconCategory::Popular, "node.JS");
        assert_eq!(results, vec![icon("node-dot-js", "Node.js")]);
    }

    #[test]
    fn test_search_matches_slug() {
        let results = search(IconCategory::Tools, "CODE");
        assert!(results.iter().any(|entry| entry.name == "visual-studio-code"));
    }

    #[test]
    fn test_empty_term_returns_category() {
        assert_eq!(search(IconCategory::Brands, "  ").len(), list(IconCategory::Brands).len());
        assert!(search(IconCategory::Social, "zzz").is_empty());
    }

    #[test]
    fn test_find_across_categories() {
        let (category, entry) = find("grafana").unwrap();
        assert_eq!(category, IconCategory::Tech);
        assert_eq!(entry.display, "Grafana");
        assert!(find("unknown").is_none());
    }
}
