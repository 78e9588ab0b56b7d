pub const DEFAULT_AVATAR_URL_TEMPLATE: &str = "https://avatars.dicebear.com/api/open-peeps/{seed}.svg";
const PLACEHOLDER_SEED: &str = "placeholder";

/// Builds avatar image urls from a seed string.
#[derive(Debug, Clone)]
pub struct AvatarUrl {
    template: String,
}

impl AvatarUrl {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    pub fn for_seed(&self, seed: &str) -> String {
        let seed = match seed.trim() {
            "" => PLACEHOLDER_SEED,
            seed => seed,
        };
        self.template
            .replace("{seed}", urlencoding::encode(seed).as_ref())
    }
}

impl Default for AvatarUrl {
    fn default() -> Self {
        Self::new(DEFAULT_AVATAR_URL_TEMPLATE)
    }
}
