//! Backend records shown on detail pages.
//!
//! The backend is an external collaborator and its payloads vary between
//! endpoints, so every field except the title is optional and a few common
//! alternative spellings are accepted. A payload may carry both spellings of
//! a field; the primary one wins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Timestamp;

/// What a detail page needs from a record to build its metadata.
pub trait CatalogRecord {
    /// Heading used as the page title.
    fn title(&self) -> &str;

    /// Plain-text summary used as the meta description.
    fn summary(&self) -> Option<&str>;

    /// Absolute URL of the image used for social sharing.
    fn share_image(&self) -> Option<&str>;

    /// Publication instant, for records that are articles.
    fn published_at(&self) -> Option<&Timestamp> {
        None
    }
}

/// A payload that cannot become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record has no '{0}'")]
    MissingField(&'static str),
}

/// A property listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawListing")]
pub struct Listing {
    pub title: String,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub city: Option<String>,
    /// "sale" or "rent" in the backend's vocabulary.
    pub offer_type: Option<String>,
}

#[derive(Deserialize)]
struct RawListing {
    title: Option<String>,
    name: Option<String>,
    description: Option<String>,
    images: Option<Vec<String>>,
    photos: Option<Vec<String>>,
    price: Option<f64>,
    currency: Option<String>,
    city: Option<String>,
    offer_type: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl TryFrom<RawListing> for Listing {
    type Error = RecordError;

    fn try_from(raw: RawListing) -> Result<Self, Self::Error> {
        Ok(Self {
            title: raw.title.or(raw.name).ok_or(RecordError::MissingField("title"))?,
            description: raw.description,
            images: raw.images.or(raw.photos).unwrap_or_default(),
            price: raw.price,
            currency: raw.currency,
            city: raw.city,
            offer_type: raw.offer_type.or(raw.kind),
        })
    }
}

impl CatalogRecord for Listing {
    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn share_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A blog article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlogPost")]
pub struct BlogPost {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub published_at: Option<Timestamp>,
}

#[derive(Deserialize)]
struct RawBlogPost {
    title: Option<String>,
    excerpt: Option<String>,
    summary: Option<String>,
    content: Option<String>,
    cover_image: Option<String>,
    image: Option<String>,
    published_at: Option<Timestamp>,
    created_at: Option<Timestamp>,
}

impl TryFrom<RawBlogPost> for BlogPost {
    type Error = RecordError;

    fn try_from(raw: RawBlogPost) -> Result<Self, Self::Error> {
        Ok(Self {
            title: raw.title.ok_or(RecordError::MissingField("title"))?,
            excerpt: raw.excerpt.or(raw.summary),
            content: raw.content,
            cover_image: raw.cover_image.or(raw.image),
            published_at: raw.published_at.or(raw.created_at),
        })
    }
}

impl CatalogRecord for BlogPost {
    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        self.excerpt.as_deref().or(self.content.as_deref())
    }

    fn share_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    fn published_at(&self) -> Option<&Timestamp> {
        self.published_at.as_ref()
    }
}

/// A real-estate agent's public profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAgent")]
pub struct Agent {
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub company: Option<String>,
    pub listings_count: Option<u32>,
}

#[derive(Deserialize)]
struct RawAgent {
    name: Option<String>,
    full_name: Option<String>,
    bio: Option<String>,
    about: Option<String>,
    avatar: Option<String>,
    photo: Option<String>,
    company: Option<String>,
    listings_count: Option<u32>,
}

impl TryFrom<RawAgent> for Agent {
    type Error = RecordError;

    fn try_from(raw: RawAgent) -> Result<Self, Self::Error> {
        Ok(Self {
            name: raw.name.or(raw.full_name).ok_or(RecordError::MissingField("name"))?,
            bio: raw.bio.or(raw.about),
            avatar: raw.avatar.or(raw.photo),
            company: raw.company,
            listings_count: raw.listings_count,
        })
    }
}

impl CatalogRecord for Agent {
    fn title(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    fn share_image(&self) -> Option<&str> {
        self.avatar.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_accepts_minimal_payload() {
        let listing: Listing = serde_json::from_value(json!({ "title": "Sea view flat" })).unwrap();
        assert_eq!(listing.title(), "Sea view flat");
        assert!(listing.summary().is_none());
        assert!(listing.share_image().is_none());
    }

    #[test]
    fn listing_uses_first_photo_and_aliases() {
        let listing: Listing = serde_json::from_value(json!({
            "name": "Villa",
            "photos": ["https://cdn.example.com/1.jpg", "https://cdn.example.com/2.jpg"],
            "type": "rent",
            "price": 1200.0
        }))
        .unwrap();
        assert_eq!(listing.title, "Villa");
        assert_eq!(listing.share_image(), Some("https://cdn.example.com/1.jpg"));
        assert_eq!(listing.offer_type.as_deref(), Some("rent"));
    }

    #[test]
    fn listing_ignores_unknown_fields() {
        let listing: Listing =
            serde_json::from_value(json!({ "title": "Shop", "owner": { "id": 3 } })).unwrap();
        assert_eq!(listing.title, "Shop");
    }

    #[test]
    fn listing_without_title_is_rejected() {
        assert!(serde_json::from_value::<Listing>(json!({ "price": 10 })).is_err());
    }

    #[test]
    fn blog_summary_prefers_excerpt() {
        let post: BlogPost = serde_json::from_value(json!({
            "title": "Buying guide",
            "excerpt": "Short",
            "content": "Long body"
        }))
        .unwrap();
        assert_eq!(post.summary(), Some("Short"));

        let post: BlogPost =
            serde_json::from_value(json!({ "title": "t", "content": "Body" })).unwrap();
        assert_eq!(post.summary(), Some("Body"));
    }

    #[test]
    fn blog_reads_publication_time() {
        let post: BlogPost = serde_json::from_value(json!({
            "title": "t",
            "created_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(
            post.published_at.unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
    }

    #[test]
    fn both_spellings_prefer_the_primary_one() {
        let listing: Listing = serde_json::from_value(json!({
            "title": "Villa",
            "name": "villa-12",
            "images": ["https://cdn.example.com/a.jpg"],
            "photos": ["https://cdn.example.com/b.jpg"]
        }))
        .unwrap();
        assert_eq!(listing.title, "Villa");
        assert_eq!(listing.share_image(), Some("https://cdn.example.com/a.jpg"));

        let post: BlogPost = serde_json::from_value(json!({
            "title": "t",
            "published_at": "2024-06-01T00:00:00Z",
            "created_at": "2024-05-01T00:00:00Z",
            "image": "https://cdn.example.com/cover.jpg"
        }))
        .unwrap();
        assert_eq!(post.published_at.unwrap().to_rfc3339(), "2024-06-01T00:00:00+00:00");
        assert_eq!(post.share_image(), Some("https://cdn.example.com/cover.jpg"));

        let agent: Agent = serde_json::from_value(json!({
            "name": "Omar",
            "full_name": "Omar Haddad",
            "bio": "Aleppo",
            "about": "Ten years"
        }))
        .unwrap();
        assert_eq!(agent.title(), "Omar");
        assert_eq!(agent.summary(), Some("Aleppo"));
    }

    #[test]
    fn agent_without_name_is_rejected() {
        let err = serde_json::from_value::<Agent>(json!({ "bio": "x" })).unwrap_err();
        assert!(err.to_string().contains("record has no 'name'"));
    }

    #[test]
    fn agent_maps_profile_fields() {
        let agent: Agent = serde_json::from_value(json!({
            "full_name": "Omar Haddad",
            "about": "Ten years in Aleppo real estate",
            "photo": "https://cdn.example.com/omar.png"
        }))
        .unwrap();
        assert_eq!(agent.title(), "Omar Haddad");
        assert_eq!(agent.summary(), Some("Ten years in Aleppo real estate"));
        assert_eq!(agent.share_image(), Some("https://cdn.example.com/omar.png"));
    }
}
