use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;

use scriptdesk_rust::storage::UserStore;
use scriptdesk_rust::{api, Conf};

#[derive(Parser, Debug)]
#[command(name = "scriptdesk", version, about = "Screenwriting assets and DOCX export")]
struct Cli {
    /// 数据目录（users.json / scripts.json）
    #[arg(long, env = "DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// 导出目录
    #[arg(long, env = "SCRIPT_FILE_PATH")]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 创建演示用户 Test 和示例剧本
    Seed,
    /// 导出整个剧本
    Export {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        script: String,
        /// 作者署名
        #[arg(short, long)]
        author: Option<String>,
    },
    /// 导出单个场景
    ExportScene {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        script: String,
        /// 场景 id
        #[arg(long)]
        scene: String,
    },
    /// 剧本统计
    Stats {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        script: String,
    },
    /// 在剧本内检索
    Search {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        script: String,
        #[arg(short, long, value_enum, default_value = "scenes")]
        kind: SearchKind,
        query: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SearchKind {
    Characters,
    Scenes,
    Locations,
}

fn print_export(result: api::ExportResult) -> Result<()> {
    if !result.success {
        bail!(result.message);
    }
    println!("{}", result.file_path.unwrap_or(result.message));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut conf = Conf::from_env();
    if let Some(dir) = cli.data_dir {
        conf.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        conf.script_file_path = dir;
    }
    conf.create_directories()
        .context("failed to create data/export directories")?;

    match cli.command {
        Commands::Seed => {
            let mut store = UserStore::open(&conf.data_dir)?;
            let script_id = store.seed_sample_data()?;
            info!("【cli】示例剧本已创建");
            println!("{}", script_id);
        }
        Commands::Export {
            user,
            script,
            author,
        } => {
            if let Some(author) = author {
                conf.default_author = author;
            }
            print_export(api::export_stored_script(&conf, &user, &script).await)?;
        }
        Commands::ExportScene {
            user,
            script,
            scene,
        } => {
            let store = UserStore::open(&conf.data_dir)?;
            let record = store
                .get_script(&user, &script)
                .ok_or_else(|| anyhow!("script not found: {}", script))?;
            let found = record
                .scenes
                .get(&scene)
                .cloned()
                .ok_or_else(|| anyhow!("scene not found: {}", scene))?;
            let title = record.name.clone();
            print_export(
                api::export_scene_to_docx(found, title, conf.script_file_path.clone()).await,
            )?;
        }
        Commands::Stats { user, script } => {
            let mut store = UserStore::open(&conf.data_dir)?;
            let workspace = store.workspace(&user, &script)?;
            let stats = workspace.statistics()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Search {
            user,
            script,
            kind,
            query,
        } => {
            let mut store = UserStore::open(&conf.data_dir)?;
            let workspace = store.workspace(&user, &script)?;
            let json = match kind {
                SearchKind::Characters => {
                    serde_json::to_string_pretty(&workspace.search_characters(&query)?)?
                }
                SearchKind::Scenes => serde_json::to_string_pretty(&workspace.search_scenes(&query)?)?,
                SearchKind::Locations => {
                    serde_json::to_string_pretty(&workspace.search_locations(&query)?)?
                }
            };
            println!("{}", json);
        }
    }

    Ok(())
}
