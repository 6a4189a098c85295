pub struct DefaultsConfig {
    pub length: usize,
    pub population_size: usize,
    pub tournament_size: usize,
    pub generations: usize,
    pub neighborhood: String,
    pub base_risk: f64,
    pub aging_rate: f64,
    pub mega_rate: f64,
    pub mega_count: usize,
    pub mega_age_threshold: u32,
    pub player_name: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            length: 20,
            population_size: 100,
            tournament_size: 3,
            generations: 100,
            neighborhood: "vn".to_string(),
            base_risk: 0.005,
            aging_rate: 0.04,
            mega_rate: 0.01,
            mega_count: 10,
            mega_age_threshold: 10,
            player_name: "anonymous".to_string(),
        }
    }
}
