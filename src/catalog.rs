use chrono::NaiveDate;
use serde::Serialize;

/// Url value marking a system that has no deployment yet.
pub const UNAVAILABLE_URL: &str = "#";

/// Operational status of a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Maintenance,
    Development,
    Offline,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Development => "development",
            Self::Offline => "offline",
        }
    }
}

/// Business area a system belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sales,
    Operations,
    Hr,
    Analytics,
    Security,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Operations => "operations",
            Self::Hr => "hr",
            Self::Analytics => "analytics",
            Self::Security => "security",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sales" => Some(Self::Sales),
            "operations" => Some(Self::Operations),
            "hr" => Some(Self::Hr),
            "analytics" => Some(Self::Analytics),
            "security" => Some(Self::Security),
            _ => None,
        }
    }
}

/// A single entry of the portal catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct System {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub url: String,
    pub icon: String,
    pub category: Category,
    pub last_accessed: Option<NaiveDate>,
    pub is_recommended: bool,
    pub status: Status,
    /// Percentage, 0-100.
    pub usage: u8,
    /// Percentage.
    pub uptime: f32,
    pub users: u32,
    pub version: String,
    pub tags: Vec<String>,
}

impl System {
    /// The url to open, or `None` while the system is still being built.
    pub fn link(&self) -> Option<&str> {
        if self.url == UNAVAILABLE_URL || self.url.is_empty() {
            None
        } else {
            Some(&self.url)
        }
    }
}

struct Fixture {
    id: u32,
    name: &'static str,
    description: &'static str,
    url: &'static str,
    icon: &'static str,
    category: Category,
    last_accessed: Option<(i32, u32, u32)>,
    is_recommended: bool,
    status: Status,
    usage: u8,
    uptime: f32,
    users: u32,
    version: &'static str,
    tags: [&'static str; 3],
}

const FIXTURES: [Fixture; 6] = [
    Fixture {
        id: 1,
        name: "CRM System",
        description: "Advanced customer relationship management with AI-powered insights and automated workflows.",
        url: "https://crm-ecru-pi.vercel.app/",
        icon: "👥",
        category: Category::Sales,
        last_accessed: Some((2024, 1, 15)),
        is_recommended: true,
        status: Status::Active,
        usage: 87,
        uptime: 99.8,
        users: 142,
        version: "2.4.1",
        tags: ["CRM", "Sales", "Analytics"],
    },
    Fixture {
        id: 2,
        name: "Inventory Hub",
        description: "Real-time inventory tracking with predictive analytics and automated reordering.",
        url: "https://inventory-green-xi.vercel.app/",
        icon: "📦",
        category: Category::Operations,
        last_accessed: Some((2024, 1, 14)),
        is_recommended: true,
        status: Status::Active,
        usage: 92,
        uptime: 99.9,
        users: 89,
        version: "3.1.0",
        tags: ["Inventory", "Warehouse", "Automation"],
    },
    Fixture {
        id: 3,
        name: "Delivery Network",
        description: "Smart logistics platform with route optimization and real-time tracking.",
        url: "https://web-delivery-chi.vercel.app/",
        icon: "🚚",
        category: Category::Operations,
        last_accessed: Some((2024, 1, 13)),
        is_recommended: true,
        status: Status::Active,
        usage: 78,
        uptime: 99.5,
        users: 67,
        version: "1.8.3",
        tags: ["Logistics", "Delivery", "Tracking"],
    },
    Fixture {
        id: 4,
        name: "HR Central",
        description: "Comprehensive human resources platform with employee self-service and analytics.",
        url: UNAVAILABLE_URL,
        icon: "🧑",
        category: Category::Hr,
        last_accessed: None,
        is_recommended: false,
        status: Status::Development,
        usage: 0,
        uptime: 0.0,
        users: 0,
        version: "0.9.0-beta",
        tags: ["HR", "Payroll", "Benefits"],
    },
    Fixture {
        id: 5,
        name: "Analytics Dashboard",
        description: "Business intelligence platform with real-time reporting and data visualization.",
        url: UNAVAILABLE_URL,
        icon: "📊",
        category: Category::Analytics,
        last_accessed: Some((2024, 1, 12)),
        is_recommended: false,
        status: Status::Active,
        usage: 65,
        uptime: 98.7,
        users: 34,
        version: "2.0.1",
        tags: ["Analytics", "Reports", "BI"],
    },
    Fixture {
        id: 6,
        name: "Security Center",
        description: "Centralized security monitoring and access control management system.",
        url: UNAVAILABLE_URL,
        icon: "🛡",
        category: Category::Security,
        last_accessed: Some((2024, 1, 11)),
        is_recommended: false,
        status: Status::Active,
        usage: 45,
        uptime: 99.9,
        users: 12,
        version: "1.5.2",
        tags: ["Security", "Access", "Monitoring"],
    },
];

/// Build the fixed catalog shown on the dashboard.
pub fn catalog() -> Vec<System> {
    FIXTURES
        .iter()
        .map(|f| System {
            id: f.id,
            name: f.name.to_string(),
            description: f.description.to_string(),
            url: f.url.to_string(),
            icon: f.icon.to_string(),
            category: f.category,
            last_accessed: f
                .last_accessed
                .and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            is_recommended: f.is_recommended,
            status: f.status,
            usage: f.usage,
            uptime: f.uptime,
            users: f.users,
            version: f.version.to_string(),
            tags: f.tags.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

/// Every distinct tag, in the order it first appears in the catalog.
pub fn all_tags(systems: &[System]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in systems.iter().flat_map(|s| s.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Every distinct category, in the order it first appears in the catalog.
pub fn categories(systems: &[System]) -> Vec<Category> {
    let mut cats = Vec::new();
    for s in systems {
        if !cats.contains(&s.category) {
            cats.push(s.category);
        }
    }
    cats
}

pub fn find(systems: &[System], id: u32) -> Option<&System> {
    systems.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let systems = catalog();
        assert_eq!(systems.len(), 6);
        let mut ids: Vec<u32> = systems.iter().map(|s| s.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_last_accessed_dates_parse() {
        let systems = catalog();
        let hr = find(&systems, 4).unwrap();
        assert!(hr.last_accessed.is_none());
        let crm = find(&systems, 1).unwrap();
        assert_eq!(crm.last_accessed, NaiveDate::from_ymd_opt(2024, 1, 15));
        // every other record has a date
        assert_eq!(systems.iter().filter(|s| s.last_accessed.is_some()).count(), 5);
    }

    #[test]
    fn test_link_sentinel() {
        let systems = catalog();
        assert_eq!(
            find(&systems, 1).unwrap().link(),
            Some("https://crm-ecru-pi.vercel.app/")
        );
        assert!(find(&systems, 4).unwrap().link().is_none());
        assert!(find(&systems, 6).unwrap().link().is_none());
    }

    #[test]
    fn test_all_tags_first_seen_order() {
        let tags = all_tags(&catalog());
        assert_eq!(tags.len(), 17);
        assert_eq!(&tags[..4], &["CRM", "Sales", "Analytics", "Inventory"]);
        // "Analytics" shows up twice in the catalog but only once here
        assert_eq!(tags.iter().filter(|t| *t == "Analytics").count(), 1);
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            categories(&catalog()),
            vec![
                Category::Sales,
                Category::Operations,
                Category::Hr,
                Category::Analytics,
                Category::Security,
            ]
        );
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("HR"), Some(Category::Hr));
        assert_eq!(Category::parse("operations"), Some(Category::Operations));
        assert_eq!(Category::parse("all"), None);
    }
}
