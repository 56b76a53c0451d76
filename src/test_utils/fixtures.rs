use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::{
    EditorProfile, NewPortfolioItem, NewProfile, NewUser, PortfolioItem, ProfessionalType, User,
    UserType,
};
use crate::storage::Database;

/// Editor account plus profile, built fluently for search tests.
#[derive(Debug, Clone)]
pub struct EditorSeed {
    pub username: String,
    pub country: Option<String>,
    pub years: Option<u32>,
    pub basic_rate: Option<f64>,
    pub software: Vec<u32>,
    pub styles: Vec<u32>,
    pub expertise: Vec<String>,
    pub professional_type: Option<ProfessionalType>,
    pub views: u64,
}

impl EditorSeed {
    #[must_use]
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            country: None,
            years: None,
            basic_rate: None,
            software: Vec::new(),
            styles: Vec::new(),
            expertise: Vec::new(),
            professional_type: None,
            views: 0,
        }
    }

    #[must_use]
    pub fn country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }

    #[must_use]
    pub const fn years(mut self, years: u32) -> Self {
        self.years = Some(years);
        self
    }

    #[must_use]
    pub const fn rate(mut self, rate: f64) -> Self {
        self.basic_rate = Some(rate);
        self
    }

    #[must_use]
    pub fn software(mut self, ids: &[u32]) -> Self {
        self.software = ids.to_vec();
        self
    }

    #[must_use]
    pub fn styles(mut self, ids: &[u32]) -> Self {
        self.styles = ids.to_vec();
        self
    }

    #[must_use]
    pub fn expertise(mut self, terms: &[&str]) -> Self {
        self.expertise = terms.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: ProfessionalType) -> Self {
        self.professional_type = Some(kind);
        self
    }

    #[must_use]
    pub const fn views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }
}

/// Isolated project root with an on-disk database.
pub struct MarketFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
    pub db: Database,
}

impl Default for MarketFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let db = Database::open(root.join("editora.db")).expect("Failed to open database");

        println!("[FIXTURE] Created market root: {root:?}");

        Self { temp_dir, root, db }
    }

    /// Create a client account.
    #[must_use]
    pub fn client(&self, username: &str) -> User {
        self.db
            .create_user(&NewUser {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "secret".to_string(),
                user_type: UserType::Client,
                ..NewUser::default()
            })
            .expect("Failed to create client")
    }

    /// Create an editor account and its profile.
    pub fn editor(&self, seed: EditorSeed) -> (User, EditorProfile) {
        let user = self
            .db
            .create_user(&NewUser {
                username: seed.username.clone(),
                email: format!("{}@example.com", seed.username),
                password: "secret".to_string(),
                user_type: UserType::Editor,
                country: seed.country.clone(),
                years_of_experience: seed.years,
                ..NewUser::default()
            })
            .expect("Failed to create editor");
        let mut profile = self
            .db
            .create_profile(&NewProfile {
                user_id: user.id,
                headline: Some(format!("{} edits", seed.username)),
                software: seed.software.iter().copied().collect(),
                editing_styles: seed.styles.iter().copied().collect(),
                expertise: seed.expertise.clone(),
                basic_rate: seed.basic_rate,
                professional_type: seed.professional_type,
                ..NewProfile::default()
            })
            .expect("Failed to create profile");
        for _ in 0..seed.views {
            profile = self
                .db
                .increment_view_count(profile.id)
                .expect("Failed to bump views");
        }
        (user, profile)
    }

    /// Append a portfolio item to a profile.
    pub fn item(&self, profile_id: i64, title: &str) -> PortfolioItem {
        self.db
            .add_portfolio_item(
                profile_id,
                &NewPortfolioItem {
                    title: title.to_string(),
                    video_url: format!("https://vimeo.com/{}", title.len()),
                    ..NewPortfolioItem::default()
                },
            )
            .expect("Failed to add portfolio item")
    }

    /// Write `config.toml` into the root.
    #[must_use]
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.root.join("config.toml");
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }
}
