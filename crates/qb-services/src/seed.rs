//! # Seed Data
//!
//! Deterministic sample posts used as the fallback whenever the persisted
//! post collection is absent or fails to decode. Fixed ids and timestamps
//! keep the fallback reproducible across processes.

use chrono::{DateTime, Utc};
use qb_core::models::{BlogPost, Category};
use std::collections::HashSet;
use uuid::Uuid;

/// Well-known author ids for the sample content.
pub const DEMO_AUTHOR: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0001);
pub const JANE_AUTHOR: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0002);
pub const ROBERT_AUTHOR: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0003);

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn likes(users: &[Uuid]) -> HashSet<Uuid> {
    users.iter().copied().collect()
}

/// The sample post collection, newest last in creation order but stored
/// newest-first like any live collection.
pub fn sample_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0103),
            title: "Evolution of Jazz in the Digital Age".into(),
            content: "<p>Jazz has always been about innovation and improvisation. \
                      In the digital age, artists are finding new ways to honor \
                      tradition while pushing boundaries with technology.</p>\
                      <p>Despite these advances, the soul of jazz remains intact: \
                      the spontaneity and technical mastery that drive the genre \
                      forward.</p>"
                .into(),
            excerpt: "Jazz has always been about innovation and improvisation. In the \
                      digital age, artists are finding new ways to honor tradition."
                .into(),
            cover_image: "https://images.unsplash.com/photo-1461749280684-dccba630e2f6".into(),
            category: Category::Music,
            author_id: ROBERT_AUTHOR,
            author_name: "Robert Johnson".into(),
            author_image: None,
            created_at: at(1_747_302_300),
            likes: likes(&[DEMO_AUTHOR, JANE_AUTHOR]),
            dislikes: HashSet::new(),
            favorites: likes(&[DEMO_AUTHOR]),
        },
        BlogPost {
            id: Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0102),
            title: "Top RPG Games of 2025".into(),
            content: "<p>2025 has been an incredible year for RPG enthusiasts. With \
                      technological advancements enabling more immersive worlds than \
                      ever before, developers have delivered some truly groundbreaking \
                      titles.</p><p>Whether you prefer fantasy settings or science \
                      fiction universes, this year's lineup has something special for \
                      everyone.</p>"
                .into(),
            excerpt: "2025 has been an incredible year for RPG enthusiasts, with more \
                      immersive worlds than ever before."
                .into(),
            cover_image: "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d".into(),
            category: Category::Gaming,
            author_id: JANE_AUTHOR,
            author_name: "Jane Smith".into(),
            author_image: None,
            created_at: at(1_747_059_600),
            likes: likes(&[DEMO_AUTHOR]),
            dislikes: HashSet::new(),
            favorites: HashSet::new(),
        },
        BlogPost {
            id: Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0101),
            title: "The Future of AI in Web Development".into(),
            content: "<p>Artificial intelligence is revolutionizing how we build \
                      websites. From automated testing to intelligent design \
                      suggestions, AI tools are making developers more productive \
                      than ever.</p><p>The future of web development will involve \
                      collaboration between human creativity and AI efficiency.</p>"
                .into(),
            excerpt: "Artificial intelligence is revolutionizing how we build websites, \
                      making developers more productive than ever."
                .into(),
            cover_image: "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b".into(),
            category: Category::Technology,
            author_id: DEMO_AUTHOR,
            author_name: "Demo User".into(),
            author_image: None,
            created_at: at(1_746_873_000),
            likes: likes(&[JANE_AUTHOR]),
            dislikes: HashSet::new(),
            favorites: likes(&[JANE_AUTHOR]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_deterministic_and_newest_first() {
        let a = sample_posts();
        let b = sample_posts();
        assert_eq!(a, b);
        for pair in a.windows(2) {
            assert!(pair[0].created_at > pair[1].created_at);
        }
    }

    #[test]
    fn test_seed_reaction_sets_are_disjoint() {
        for post in sample_posts() {
            assert!(post.likes.is_disjoint(&post.dislikes));
        }
    }
}
