use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{RunArgs, SweepArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use amitosis::engine::config::{
    SegregationMode, SimulationConfig, SimulationConfigBuilder, SweepConfig,
};

pub fn build_run_config(args: &RunArgs) -> Result<SimulationConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let pop = file_config.population.take().unwrap_or_default();
    let mutation = file_config.mutation.take().unwrap_or_default();
    let segregation = file_config.segregation.take().unwrap_or_default();
    let run = file_config.run.take().unwrap_or_default();

    let mode = match (args.segregation.amitosis, args.segregation.mitosis) {
        (true, false) => SegregationMode::Amitosis,
        (false, true) => SegregationMode::Mitosis,
        _ => segregation.mode.unwrap_or(defaults.mode),
    };

    SimulationConfigBuilder::new()
        .n_reps(
            args.replicates
                .or(pop.replicates)
                .unwrap_or(defaults.replicates),
        )
        .size(args.size.or(pop.size).unwrap_or(defaults.size))
        .n_loci(args.loci.or(pop.loci).unwrap_or(defaults.loci))
        .ploidy(args.ploidy.or(pop.ploidy).unwrap_or(defaults.ploidy))
        .genomic_mu(
            args.genomic_rate
                .or(mutation.genomic_rate)
                .unwrap_or(defaults.genomic_rate),
        )
        .selcoef(
            args.selection_coefficient
                .or(mutation.selection_coefficient)
                .unwrap_or(defaults.selection_coefficient),
        )
        .segregation(mode)
        .generations(
            args.generations
                .or(run.generations)
                .unwrap_or(defaults.generations),
        )
        .interval(args.interval.or(run.interval).unwrap_or(defaults.interval))
        .seed(args.seed.or(run.seed))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

pub fn build_sweep_config(args: &SweepArgs) -> Result<SweepConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = FileConfig::from_file(&args.config)?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let pop = file_config.population.take().unwrap_or_default();
    let mutation = file_config.mutation.take().unwrap_or_default();
    let segregation = file_config.segregation.take().unwrap_or_default();
    let run = file_config.run.take().unwrap_or_default();
    let sweep = file_config.sweep.take().unwrap_or_default();

    Ok(SweepConfig {
        n_reps: pop.replicates.unwrap_or(defaults.replicates),
        sizes: axis(sweep.sizes, pop.size, defaults.size),
        n_loci: axis(sweep.loci, pop.loci, defaults.loci),
        ploidies: axis(sweep.ploidies, pop.ploidy, defaults.ploidy),
        genomic_mus: axis(
            sweep.genomic_rates,
            mutation.genomic_rate,
            defaults.genomic_rate,
        ),
        selcoefs: axis(
            sweep.selection_coefficients,
            mutation.selection_coefficient,
            defaults.selection_coefficient,
        ),
        segregation: axis(sweep.modes, segregation.mode, defaults.mode),
        generations: args
            .generations
            .or(run.generations)
            .unwrap_or(defaults.generations),
        interval: run.interval.unwrap_or(defaults.interval),
        seed: args.seed.or(run.seed),
    })
}

fn axis<T>(values: Option<Vec<T>>, single: Option<T>, default: T) -> Vec<T> {
    values.unwrap_or_else(|| vec![single.unwrap_or(default)])
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        let config_err = |e: parser::ParseError| CliError::Config(e.to_string());

        match key {
            "population.replicates" => {
                config
                    .population
                    .get_or_insert_with(Default::default)
                    .replicates = Some(parser::parse_value(key, value).map_err(config_err)?);
            }
            "population.size" => {
                config.population.get_or_insert_with(Default::default).size =
                    Some(parser::parse_value(key, value).map_err(config_err)?);
            }
            "population.loci" => {
                config.population.get_or_insert_with(Default::default).loci =
                    Some(parser::parse_value(key, value).map_err(config_err)?);
            }
            "population.ploidy" => {
                config.population.get_or_insert_with(Default::default).ploidy =
                    Some(parser::parse_value(key, value).map_err(config_err)?);
            }
            "mutation.genomic-rate" => {
                config
                    .mutation
                    .get_or_insert_with(Default::default)
                    .genomic_rate = Some(parser::parse_value(key, value).map_err(config_err)?);
            }
            "mutation.selection-coefficient" => {
                config
                    .mutation
                    .get_or_insert_with(Default::default)
                    .selection_coefficient =
                    Some(parser::parse_value(key, value).map_err(config_err)?);
            }
            "segregation.mode" => {
                config.segregation.get_or_insert_with(Default::default).mode =
                    Some(parser::parse_mode(value).map_err(config_err)?);
            }
            "run.generations" => {
                config.run.get_or_insert_with(Default::default).generations =
                    Some(parser::parse_value(key, value).map_err(config_err)?);
            }
            "run.interval" => {
                config.run.get_or_insert_with(Default::default).interval =
                    Some(parser::parse_value(key, value).map_err(config_err)?);
            }
            "run.seed" => {
                config.run.get_or_insert_with(Default::default).seed =
                    Some(parser::parse_value(key, value).map_err(config_err)?);
            }
            "sweep.sizes" => {
                config.sweep.get_or_insert_with(Default::default).sizes =
                    Some(parser::parse_list(key, value).map_err(config_err)?);
            }
            "sweep.loci" => {
                config.sweep.get_or_insert_with(Default::default).loci =
                    Some(parser::parse_list(key, value).map_err(config_err)?);
            }
            "sweep.ploidies" => {
                config.sweep.get_or_insert_with(Default::default).ploidies =
                    Some(parser::parse_list(key, value).map_err(config_err)?);
            }
            "sweep.genomic-rates" => {
                config
                    .sweep
                    .get_or_insert_with(Default::default)
                    .genomic_rates = Some(parser::parse_list(key, value).map_err(config_err)?);
            }
            "sweep.selection-coefficients" => {
                config
                    .sweep
                    .get_or_insert_with(Default::default)
                    .selection_coefficients =
                    Some(parser::parse_list(key, value).map_err(config_err)?);
            }
            "sweep.modes" => {
                config.sweep.get_or_insert_with(Default::default).modes =
                    Some(parser::parse_modes(key, value).map_err(config_err)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SegregationFlags;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn base_run_args() -> RunArgs {
        RunArgs {
            output: PathBuf::from("out.csv"),
            config: None,
            replicates: None,
            size: None,
            loci: None,
            ploidy: None,
            genomic_rate: None,
            selection_coefficient: None,
            segregation: SegregationFlags::default(),
            generations: None,
            interval: None,
            seed: None,
            set_values: vec![],
        }
    }

    fn sweep_args(config: PathBuf) -> SweepArgs {
        SweepArgs {
            config,
            output: PathBuf::from("sweep.csv"),
            generations: None,
            seed: None,
            set_values: vec![],
        }
    }

    #[test]
    fn run_config_uses_defaults_without_file_or_flags() {
        let cfg = build_run_config(&base_run_args()).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(cfg.population.n_reps, defaults.replicates);
        assert_eq!(cfg.population.size, defaults.size);
        assert_eq!(cfg.population.n_loci, defaults.loci);
        assert_eq!(cfg.population.ploidy, defaults.ploidy);
        assert_eq!(cfg.mutation.genomic_mu, defaults.genomic_rate);
        assert_eq!(cfg.mutation.selcoef, defaults.selection_coefficient);
        assert_eq!(cfg.segregation, defaults.mode);
        assert_eq!(cfg.run.generations, defaults.generations);
        assert_eq!(cfg.run.interval, defaults.interval);
        assert_eq!(cfg.run.seed, None);
    }

    #[test]
    fn run_config_reads_file_values() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            [population]
            replicates = 4
            size = 250
            loci = 20
            ploidy = 8

            [mutation]
            genomic-rate = 0.4
            selection-coefficient = 0.02

            [segregation]
            mode = "mitosis"

            [run]
            generations = 40
            interval = 4
            seed = 99
            "#,
        )
        .unwrap();

        let mut args = base_run_args();
        args.config = Some(cfg_path);
        let cfg = build_run_config(&args).expect("build ok");

        assert_eq!(cfg.population.n_reps, 4);
        assert_eq!(cfg.population.size, 250);
        assert_eq!(cfg.population.n_loci, 20);
        assert_eq!(cfg.population.ploidy, 8);
        assert_eq!(cfg.mutation.genomic_mu, 0.4);
        assert_eq!(cfg.mutation.selcoef, 0.02);
        assert_eq!(cfg.segregation, SegregationMode::Mitosis);
        assert_eq!(cfg.run.generations, 40);
        assert_eq!(cfg.run.interval, 4);
        assert_eq!(cfg.run.seed, Some(99));
    }

    #[test]
    fn cli_flags_override_set_values_which_override_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            "[population]\nploidy = 8\nsize = 100\n[segregation]\nmode = \"mitosis\"\n",
        )
        .unwrap();

        let mut args = base_run_args();
        args.config = Some(cfg_path);
        args.set_values = vec![
            "population.ploidy=16".to_string(),
            "population.size=300".to_string(),
        ];
        args.size = Some(500);
        args.segregation = SegregationFlags {
            amitosis: true,
            mitosis: false,
        };

        let cfg = build_run_config(&args).expect("build ok");
        assert_eq!(cfg.population.ploidy, 16);
        assert_eq!(cfg.population.size, 500);
        assert_eq!(cfg.segregation, SegregationMode::Amitosis);
    }

    #[test]
    fn set_values_cover_every_run_key() {
        let mut args = base_run_args();
        args.set_values = vec![
            "population.replicates=3".to_string(),
            "population.loci=7".to_string(),
            "mutation.genomic-rate=0.05".to_string(),
            "mutation.selection-coefficient=-0.2".to_string(),
            "segregation.mode=mitosis".to_string(),
            "run.generations=12".to_string(),
            "run.interval=6".to_string(),
            "run.seed=5".to_string(),
        ];

        let cfg = build_run_config(&args).expect("build ok");
        assert_eq!(cfg.population.n_reps, 3);
        assert_eq!(cfg.population.n_loci, 7);
        assert!((cfg.mutation.genomic_mu - 0.05).abs() < 1e-12);
        assert!((cfg.mutation.selcoef + 0.2).abs() < 1e-12);
        assert_eq!(cfg.segregation, SegregationMode::Mitosis);
        assert_eq!(cfg.run.generations, 12);
        assert_eq!(cfg.run.interval, 6);
        assert_eq!(cfg.run.seed, Some(5));
    }

    #[test]
    fn unsupported_or_malformed_set_values_are_rejected() {
        let mut args = base_run_args();
        args.set_values = vec!["population.colour=blue".to_string()];
        assert!(matches!(build_run_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["population.ploidy".to_string()];
        assert!(matches!(build_run_config(&args), Err(CliError::Config(_))));

        args.set_values = vec!["population.ploidy=many".to_string()];
        assert!(matches!(build_run_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_parameters_surface_as_config_errors() {
        let mut args = base_run_args();
        args.selection_coefficient = Some(-3.0);
        let err = build_run_config(&args).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("selcoef")));
    }

    #[test]
    fn sweep_config_falls_back_to_single_values_for_unswept_axes() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("sweep.toml");
        fs::write(
            &cfg_path,
            r#"
            [population]
            replicates = 6
            size = 150

            [mutation]
            selection-coefficient = -0.03

            [run]
            generations = 80
            interval = 8
            seed = 3

            [sweep]
            ploidies = [2, 45]
            modes = ["amitosis", "mitosis"]
            "#,
        )
        .unwrap();

        let sweep = build_sweep_config(&sweep_args(cfg_path)).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(sweep.n_reps, 6);
        assert_eq!(sweep.sizes, vec![150]);
        assert_eq!(sweep.n_loci, vec![defaults.loci]);
        assert_eq!(sweep.ploidies, vec![2, 45]);
        assert_eq!(sweep.genomic_mus, vec![defaults.genomic_rate]);
        assert_eq!(sweep.selcoefs, vec![-0.03]);
        assert_eq!(
            sweep.segregation,
            vec![SegregationMode::Amitosis, SegregationMode::Mitosis]
        );
        assert_eq!(sweep.generations, 80);
        assert_eq!(sweep.interval, 8);
        assert_eq!(sweep.seed, Some(3));
        assert_eq!(sweep.len(), 4);
    }

    #[test]
    fn sweep_cli_overrides_and_set_lists_apply() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("sweep.toml");
        fs::write(&cfg_path, "[run]\ngenerations = 80\nseed = 3\n").unwrap();

        let mut args = sweep_args(cfg_path);
        args.generations = Some(10);
        args.seed = Some(8);
        args.set_values = vec![
            "sweep.sizes=10,20".to_string(),
            "sweep.selection-coefficients=[-0.01,0.01]".to_string(),
            "sweep.modes=mitosis".to_string(),
        ];

        let sweep = build_sweep_config(&args).expect("build ok");
        assert_eq!(sweep.generations, 10);
        assert_eq!(sweep.seed, Some(8));
        assert_eq!(sweep.sizes, vec![10, 20]);
        assert_eq!(sweep.selcoefs, vec![-0.01, 0.01]);
        assert_eq!(sweep.segregation, vec![SegregationMode::Mitosis]);
    }
}
