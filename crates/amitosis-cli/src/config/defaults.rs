use amitosis::engine::config::SegregationMode;

pub struct DefaultsConfig {
    pub replicates: usize,
    pub size: usize,
    pub loci: usize,
    pub ploidy: u32,
    pub genomic_rate: f64,
    pub selection_coefficient: f64,
    pub mode: SegregationMode,
    pub generations: u64,
    pub interval: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            replicates: 10,
            size: 1000,
            loci: 100,
            ploidy: 45,
            genomic_rate: 0.1,
            selection_coefficient: -0.01,
            mode: SegregationMode::Amitosis,
            generations: 1000,
            interval: 10,
        }
    }
}
