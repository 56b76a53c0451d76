//! Demo data for local development and the `seed` command.

use serde::Serialize;
use tracing::info;

use super::sqlite::Database;
use crate::core::{
    NewPortfolioItem, NewProfile, NewReview, NewUser, ProfessionalType, UserType,
};
use crate::error::Result;

/// Marker account; its presence means the demo set is already loaded.
pub const DEMO_CLIENT: &str = "demo_client";

struct DemoEditor {
    username: &'static str,
    full_name: &'static str,
    country: &'static str,
    years: u32,
    headline: &'static str,
    software: &'static [u32],
    styles: &'static [u32],
    expertise: &'static [&'static str],
    rates: (f64, f64, f64),
    kind: Option<ProfessionalType>,
    reel: &'static str,
    rating: u8,
}

const EDITORS: &[DemoEditor] = &[
    DemoEditor {
        username: "valentina_cuts",
        full_name: "Valentina Rojas",
        country: "Chile",
        years: 7,
        headline: "Documentary and brand films",
        software: &[1, 2],
        styles: &[1, 4],
        expertise: &["documentary", "color grading"],
        rates: (45.0, 70.0, 110.0),
        kind: None,
        reel: "https://vimeo.com/100001",
        rating: 5,
    },
    DemoEditor {
        username: "mateo_motion",
        full_name: "Mateo Fernández",
        country: "Argentina",
        years: 4,
        headline: "Motion graphics for social",
        software: &[3],
        styles: &[2, 3],
        expertise: &["motion graphics", "youtube"],
        rates: (30.0, 50.0, 80.0),
        kind: Some(ProfessionalType::Animator),
        reel: "https://vimeo.com/100002",
        rating: 4,
    },
    DemoEditor {
        username: "lucia_color",
        full_name: "Lucía Gómez",
        country: "México",
        years: 2,
        headline: "Colorist for music videos",
        software: &[4],
        styles: &[5],
        expertise: &["color grading", "music videos"],
        rates: (25.0, 40.0, 65.0),
        kind: Some(ProfessionalType::Colorist),
        reel: "https://vimeo.com/100003",
        rating: 4,
    },
    DemoEditor {
        username: "diego_weddings",
        full_name: "Diego Silva",
        country: "Colombia",
        years: 10,
        headline: "Wedding films and highlights",
        software: &[1, 2, 4],
        styles: &[1],
        expertise: &["weddings", "events"],
        rates: (60.0, 90.0, 140.0),
        kind: Some(ProfessionalType::Editor),
        reel: "https://vimeo.com/100004",
        rating: 5,
    },
    DemoEditor {
        username: "sofia_shorts",
        full_name: "Sofía Pereira",
        country: "Uruguay",
        years: 1,
        headline: "Short-form vertical edits",
        software: &[5],
        styles: &[3],
        expertise: &["tiktok", "reels"],
        rates: (15.0, 25.0, 40.0),
        kind: None,
        reel: "https://vimeo.com/100005",
        rating: 3,
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: usize,
    pub profiles: usize,
    pub portfolio_items: usize,
    pub reviews: usize,
    pub already_seeded: bool,
}

impl Database {
    /// Load the demo set once. A second call is a no-op.
    pub fn seed_demo(&self) -> Result<SeedReport> {
        if self.get_user_by_username(DEMO_CLIENT)?.is_some() {
            info!("demo data already present");
            return Ok(SeedReport {
                already_seeded: true,
                ..SeedReport::default()
            });
        }

        let mut report = SeedReport::default();
        let client = self.create_user(&NewUser {
            username: DEMO_CLIENT.to_string(),
            email: "client@editora.dev".to_string(),
            password: "demo".to_string(),
            full_name: Some("Demo Client".to_string()),
            user_type: UserType::Client,
            country: Some("Perú".to_string()),
            years_of_experience: None,
            bio: None,
        })?;
        report.users += 1;

        for editor in EDITORS {
            let user = self.create_user(&NewUser {
                username: editor.username.to_string(),
                email: format!("{}@editora.dev", editor.username),
                password: "demo".to_string(),
                full_name: Some(editor.full_name.to_string()),
                user_type: UserType::Editor,
                country: Some(editor.country.to_string()),
                years_of_experience: Some(editor.years),
                bio: None,
            })?;
            report.users += 1;

            let (basic, medium, advanced) = editor.rates;
            let profile = self.create_profile(&NewProfile {
                user_id: user.id,
                headline: Some(editor.headline.to_string()),
                about: None,
                software: editor.software.iter().copied().collect(),
                editing_styles: editor.styles.iter().copied().collect(),
                expertise: editor.expertise.iter().map(ToString::to_string).collect(),
                equipment: Vec::new(),
                basic_rate: Some(basic),
                medium_rate: Some(medium),
                advanced_rate: Some(advanced),
                professional_type: editor.kind,
            })?;
            report.profiles += 1;

            for (title, url) in [("Showreel", editor.reel), ("Client cut", editor.reel)] {
                self.add_portfolio_item(
                    profile.id,
                    &NewPortfolioItem {
                        title: format!("{title}: {}", editor.full_name),
                        video_url: url.to_string(),
                        ..NewPortfolioItem::default()
                    },
                )?;
                report.portfolio_items += 1;
            }

            self.create_review(&NewReview {
                profile_id: profile.id,
                reviewer_id: client.id,
                rating: editor.rating,
                comment: Some("Delivered on time".to_string()),
            })?;
            report.reviews += 1;
        }

        info!(
            users = report.users,
            profiles = report.profiles,
            "seeded demo data"
        );
        Ok(report)
    }
}
