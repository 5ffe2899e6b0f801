//! The site's page table.
//!
//! Each entry fixes everything static about a page: its URL pattern (below the
//! locale prefix), the role it requires, which header it uses, the body
//! component, whether the call-to-action banner is appended and which backend
//! record (if any) the page displays.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::access::RouteRequirement;
use crate::domain::foundation::Role;

/// Stable identifier of a page; doubles as its translation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PageId {
    Home,
    Properties,
    PropertyDetails,
    Blog,
    BlogPost,
    Agents,
    AgentProfile,
    About,
    Vision,
    Contact,
    Faq,
    PrivacyPolicy,
    Terms,
    Login,
    Register,
    Forbidden,
    Dashboard,
    Favorites,
    Profile,
    MyProperty,
    AddProperty,
    EditProperty,
    Admin,
    AdminUsers,
    NotFound,
}

impl PageId {
    /// Key used for `breadcrumb.*` and `metadata.*` translations.
    pub fn key(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Properties => "properties",
            PageId::PropertyDetails => "propertyDetails",
            PageId::Blog => "blog",
            PageId::BlogPost => "blogPost",
            PageId::Agents => "agents",
            PageId::AgentProfile => "agentProfile",
            PageId::About => "about",
            PageId::Vision => "vision",
            PageId::Contact => "contact",
            PageId::Faq => "faq",
            PageId::PrivacyPolicy => "privacyPolicy",
            PageId::Terms => "terms",
            PageId::Login => "login",
            PageId::Register => "register",
            PageId::Forbidden => "forbidden",
            PageId::Dashboard => "dashboard",
            PageId::Favorites => "favorites",
            PageId::Profile => "profile",
            PageId::MyProperty => "myProperty",
            PageId::AddProperty => "addProperty",
            PageId::EditProperty => "editProperty",
            PageId::Admin => "admin",
            PageId::AdminUsers => "adminUsers",
            PageId::NotFound => "notFound",
        }
    }

    /// The page one level up in the breadcrumb trail, below home.
    pub fn parent(&self) -> Option<PageId> {
        match self {
            PageId::PropertyDetails => Some(PageId::Properties),
            PageId::BlogPost => Some(PageId::Blog),
            PageId::AgentProfile => Some(PageId::Agents),
            PageId::Favorites | PageId::Profile | PageId::MyProperty => Some(PageId::Dashboard),
            PageId::AddProperty | PageId::EditProperty => Some(PageId::MyProperty),
            PageId::AdminUsers => Some(PageId::Admin),
            _ => None,
        }
    }
}

/// Backend record a detail page displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Listing,
    BlogPost,
    Agent,
}

/// Static description of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    pub page: PageId,
    /// Path below the locale prefix; `:name` segments capture parameters.
    pub pattern: &'static str,
    pub requirement: RouteRequirement,
    /// Dashboard pages get the dashboard header.
    pub dashboard: bool,
    pub component: &'static str,
    pub cta: bool,
    pub record: Option<RecordKind>,
}

impl RouteDef {
    const fn public(page: PageId, pattern: &'static str, component: &'static str, cta: bool) -> Self {
        Self {
            page,
            pattern,
            requirement: Role::Anonymous,
            dashboard: false,
            component,
            cta,
            record: None,
        }
    }

    const fn detail(
        page: PageId,
        pattern: &'static str,
        component: &'static str,
        record: RecordKind,
    ) -> Self {
        Self {
            page,
            pattern,
            requirement: Role::Anonymous,
            dashboard: false,
            component,
            cta: true,
            record: Some(record),
        }
    }

    const fn gated(
        page: PageId,
        pattern: &'static str,
        component: &'static str,
        requirement: RouteRequirement,
    ) -> Self {
        Self {
            page,
            pattern,
            requirement,
            dashboard: true,
            component,
            cta: false,
            record: None,
        }
    }

    /// Returns true if the page is visible without a session.
    pub fn is_public(&self) -> bool {
        !self.requirement.is_authenticated()
    }

    /// The pattern's leading literal segments, e.g. `my-property` for
    /// `my-property/:id/edit`.
    pub fn static_prefix(&self) -> String {
        self.pattern
            .split('/')
            .take_while(|segment| !segment.starts_with(':'))
            .collect::<Vec<_>>()
            .join("/")
    }

    fn match_path(&self, page_path: &str) -> Option<BTreeMap<&'static str, String>> {
        let pattern: Vec<&'static str> = split_segments(self.pattern).collect();
        let path: Vec<&str> = split_segments(page_path).collect();
        if pattern.len() != path.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (expected, actual) in pattern.into_iter().zip(path) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    params.insert(name, actual.to_string());
                }
                None if expected == actual => {}
                None => return None,
            }
        }
        Some(params)
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Every routable page.
pub static ROUTES: &[RouteDef] = &[
    RouteDef::public(PageId::Home, "", "HomePage", true),
    RouteDef::public(PageId::Properties, "properties", "PropertyList", true),
    RouteDef::detail(PageId::PropertyDetails, "properties/:id", "PropertyDetails", RecordKind::Listing),
    RouteDef::public(PageId::Blog, "blog", "BlogList", true),
    RouteDef::detail(PageId::BlogPost, "blog/:id", "BlogPost", RecordKind::BlogPost),
    RouteDef::public(PageId::Agents, "agents", "AgentList", true),
    RouteDef::detail(PageId::AgentProfile, "agents/:id", "AgentProfile", RecordKind::Agent),
    RouteDef::public(PageId::About, "about", "AboutPage", true),
    RouteDef::public(PageId::Vision, "vision", "VisionPage", true),
    RouteDef::public(PageId::Contact, "contact", "ContactForm", false),
    RouteDef::public(PageId::Faq, "faq", "FaqPage", true),
    RouteDef::public(PageId::PrivacyPolicy, "privacy-policy", "PrivacyPolicy", false),
    RouteDef::public(PageId::Terms, "terms", "TermsPage", false),
    RouteDef::public(PageId::Login, "login", "LoginForm", false),
    RouteDef::public(PageId::Register, "register", "RegisterForm", false),
    RouteDef::public(PageId::Forbidden, "forbidden", "ForbiddenNotice", false),
    RouteDef::gated(PageId::Dashboard, "dashboard", "DashboardHome", Role::User),
    RouteDef::gated(PageId::Favorites, "favorites", "FavoriteList", Role::User),
    RouteDef::gated(PageId::Profile, "profile", "ProfileForm", Role::User),
    RouteDef::gated(PageId::MyProperty, "my-property", "MyPropertyList", Role::Agent),
    RouteDef::gated(PageId::AddProperty, "my-property/new", "PropertyEditor", Role::Agent),
    RouteDef::gated(PageId::EditProperty, "my-property/:id/edit", "PropertyEditor", Role::Agent),
    RouteDef::gated(PageId::Admin, "admin", "AdminHome", Role::Admin),
    RouteDef::gated(PageId::AdminUsers, "admin/users", "AdminUserList", Role::Admin),
];

/// Pseudo-route rendered for paths that match nothing.
pub static NOT_FOUND_ROUTE: RouteDef =
    RouteDef::public(PageId::NotFound, "", "NotFoundNotice", false);

/// A page path matched against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static RouteDef,
    pub params: BTreeMap<&'static str, String>,
}

impl RouteMatch {
    /// Returns a captured parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Finds the page for `page_path` (locale prefix already removed).
///
/// Literal segments win over parameters: `my-property/new` is the add page,
/// not an edit page for a property called "new".
pub fn match_route(page_path: &str) -> Option<RouteMatch> {
    ROUTES.iter().find_map(|route| {
        route
            .match_path(page_path)
            .map(|params| RouteMatch { route, params })
    })
}

/// Looks up a page's table entry.
pub fn route_for(page: PageId) -> &'static RouteDef {
    ROUTES
        .iter()
        .find(|route| route.page == page)
        .unwrap_or(&NOT_FOUND_ROUTE)
}

/// Builds a page's path below the locale prefix, filling `:params` in order.
pub fn page_path(page: PageId, params: &[&str]) -> String {
    let mut values = params.iter();
    split_segments(route_for(page).pattern)
        .map(|segment| {
            if segment.starts_with(':') {
                values.next().copied().unwrap_or_default().to_string()
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn home_matches_empty_path() {
        let matched = match_route("").unwrap();
        assert_eq!(matched.route.page, PageId::Home);
        assert!(matched.params.is_empty());
    }

    #[test]
    fn captures_detail_id() {
        let matched = match_route("properties/42").unwrap();
        assert_eq!(matched.route.page, PageId::PropertyDetails);
        assert_eq!(matched.param("id"), Some("42"));
        assert_eq!(matched.route.record, Some(RecordKind::Listing));
    }

    #[test]
    fn literal_segment_beats_parameter() {
        assert_eq!(match_route("my-property/new").unwrap().route.page, PageId::AddProperty);
        let edit = match_route("my-property/9/edit").unwrap();
        assert_eq!(edit.route.page, PageId::EditProperty);
        assert_eq!(edit.param("id"), Some("9"));
    }

    #[test]
    fn unknown_paths_do_not_match() {
        assert!(match_route("nowhere").is_none());
        assert!(match_route("properties/1/photos").is_none());
    }

    #[test]
    fn property_management_is_agent_only() {
        for page in [PageId::MyProperty, PageId::AddProperty, PageId::EditProperty] {
            assert_eq!(route_for(page).requirement, Role::Agent);
        }
    }

    #[test]
    fn gated_pages_use_dashboard_header() {
        for route in ROUTES {
            assert_eq!(route.dashboard, !route.is_public(), "{:?}", route.page);
        }
    }

    #[test]
    fn table_has_unique_pages_and_patterns() {
        let pages: HashSet<_> = ROUTES.iter().map(|r| r.page).collect();
        let patterns: HashSet<_> = ROUTES.iter().map(|r| r.pattern).collect();
        assert_eq!(pages.len(), ROUTES.len());
        assert_eq!(patterns.len(), ROUTES.len());
    }

    #[test]
    fn static_prefix_stops_at_parameter() {
        assert_eq!(route_for(PageId::EditProperty).static_prefix(), "my-property");
        assert_eq!(route_for(PageId::AdminUsers).static_prefix(), "admin/users");
    }

    #[test]
    fn page_path_fills_parameters() {
        assert_eq!(page_path(PageId::EditProperty, &["7"]), "my-property/7/edit");
        assert_eq!(page_path(PageId::Home, &[]), "");
        assert_eq!(page_path(PageId::Login, &[]), "login");
    }

    #[test]
    fn parents_chain_up_to_a_top_level_page() {
        assert_eq!(PageId::EditProperty.parent(), Some(PageId::MyProperty));
        assert_eq!(PageId::MyProperty.parent(), Some(PageId::Dashboard));
        assert_eq!(PageId::Dashboard.parent(), None);
        assert_eq!(PageId::Home.parent(), None);
    }

    #[test]
    fn page_keys_are_camel_case() {
        assert_eq!(PageId::PrivacyPolicy.key(), "privacyPolicy");
        assert_eq!(
            serde_json::to_string(&PageId::PropertyDetails).unwrap(),
            "\"propertyDetails\""
        );
    }
}
