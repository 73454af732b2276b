use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use sveger_core::config::{self, CONFIG_FILE_NAME, SvegerConfig};
use sveger_core::ir::ClientModel;
use sveger_core::parse::{self, Document};
use sveger_core::transform::build_model;
use sveger_core::{CodeGenerator, GeneratedFile};
use sveger_typescript::{GeneratorOptions, TypeScriptGenerator};

#[derive(Parser)]
#[command(
    name = "sveger",
    about = "Swagger 2 / OpenAPI 3 to TypeScript Axios client generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a TypeScript client from an API description
    Generate(GenerateArgs),

    /// Validate an API description
    Validate {
        /// Path to the Swagger/OpenAPI file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the client model built from an API description
    Inspect {
        /// Path to the Swagger/OpenAPI file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Write a default .sveger.yaml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Flags for `generate`. Each one given overrides `.sveger.yaml`.
#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Path to the Swagger/OpenAPI file (YAML or JSON)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base URL baked into the client (defaults to the document's first server)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Authentication mode: bearer, apikey, basic or none
    #[arg(long)]
    auth: Option<String>,

    /// Add request/response interceptor hooks to axios.config.ts
    #[arg(long)]
    interceptors: bool,

    /// Omit JSDoc comments on operations
    #[arg(long)]
    no_jsdoc: bool,
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => cmd_generate(args),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "sveger", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load `.sveger.yaml` from the current directory, or defaults when absent.
fn load_project_config() -> Result<SvegerConfig> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let cfg = config::load_config(&config_path)?;
    if cfg.is_some() {
        log::info!("using {}", config_path.display());
    }
    Ok(cfg.unwrap_or_default())
}

fn apply_overrides(cfg: &mut SvegerConfig, args: &GenerateArgs) {
    if let Some(input) = &args.input {
        cfg.input = input.display().to_string();
    }
    if let Some(output) = &args.output {
        cfg.output = output.display().to_string();
    }
    if let Some(base_url) = &args.base_url {
        cfg.client.base_url = Some(base_url.clone());
    }
    if let Some(timeout) = args.timeout {
        cfg.client.timeout = Some(timeout);
    }
    if let Some(auth) = &args.auth {
        cfg.client.auth = auth.clone();
    }
    if args.interceptors {
        cfg.client.interceptors = true;
    }
}

fn load_document(path: &Path) -> Result<Document> {
    parse::load_path(path).with_context(|| format!("failed to load {}", path.display()))
}

fn load_model(path: &Path, cfg: &SvegerConfig) -> Result<ClientModel> {
    let doc = load_document(path)?;
    let options = cfg
        .model_options()
        .context("invalid client configuration")?;
    Ok(build_model(&doc, &options))
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn readme_content() -> &'static str {
    r#"# Generated Code - Do Not Edit

This directory is generated by `sveger`.
Manual changes will be overwritten the next time `sveger generate` runs.

To regenerate, run:
```
sveger generate
```

Connection defaults and the auth mode live in `.sveger.yaml`.
"#
}

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let mut cfg = load_project_config()?;
    apply_overrides(&mut cfg, &args);

    let input = PathBuf::from(&cfg.input);
    let model = load_model(&input, &cfg)?;

    let options = GeneratorOptions {
        no_jsdoc: args.no_jsdoc,
    };
    let files = TypeScriptGenerator
        .generate(&model, &options)
        .context("failed to render TypeScript client")?;

    let output_dir = PathBuf::from(&cfg.output);
    eprintln!("Generating {} -> {}", input.display(), output_dir.display());
    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;

    write_files(&output_dir, &files)?;

    let readme_path = output_dir.join("README.md");
    fs::write(&readme_path, readme_content())
        .with_context(|| format!("failed to write {}", readme_path.display()))?;
    eprintln!("  wrote {}", readme_path.display());

    eprintln!(
        "Generated {} files for {} resources in {}",
        files.len() + 1,
        model.resources.len(),
        output_dir.display()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let doc = load_document(&input)?;

    let dialect = match doc.dialect {
        parse::Dialect::OpenApi3 => "OpenAPI",
        parse::Dialect::Swagger2 => "Swagger",
    };
    eprintln!("Valid {} {} document: {}", dialect, doc.version, doc.info.title);
    eprintln!("  Version: {}", doc.info.version);
    eprintln!("  Paths: {}", doc.paths.len());
    eprintln!("  Schemas: {}", doc.schemas.len());

    let model = build_model(&doc, &load_project_config()?.model_options()?);
    eprintln!("  Resources: {}", model.resource_names().join(", "));
    eprintln!(
        "  Operations: {}",
        model.resources.iter().map(|r| r.methods.len()).sum::<usize>()
    );

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = load_project_config()?;
    let model = load_model(&input, &cfg)?;

    match format {
        InspectFormat::Yaml => {
            // YAML cannot tag nested enum variants; go through JSON's map form.
            let yaml = serde_yaml_ng::to_string(&serde_json::to_value(&model)?)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&model)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
