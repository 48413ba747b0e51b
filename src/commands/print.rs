//! `treenav print`: render a tree built from JSON records

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use treenav::config::Config;
use treenav::ui::terminal::detect_capabilities;
use treenav::ui::widgets::tree_view::TreeView;
use treenav::{ChildHint, TreeDataConfig, TreeStore};

pub struct PrintOptions {
    pub path_key: String,
    pub name_key: String,
    pub select: Option<String>,
    pub expand_all: bool,
    pub json: bool,
    pub ascii: bool,
}

pub async fn run(file: &Path, options: PrintOptions, config: &Config) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("cannot read {}", file.display()))?;
    let records: Vec<Value> = serde_json::from_str(&content)
        .with_context(|| format!("{} must hold a JSON array of records", file.display()))?;

    let mut builder = TreeStore::builder()
        .data_config(
            TreeDataConfig::new(records, options.path_key, options.name_key),
            ChildHint::None,
        )
        .options(config.view);
    if let Some(id) = options.select {
        builder = builder.default_selected(id);
    }
    let mut store = builder.build()?;

    if options.expand_all {
        let parents: Vec<String> = store
            .nodes()
            .iter()
            .filter(|n| !n.is_root() && !n.children.is_empty())
            .map(|n| n.id.clone())
            .collect();
        for id in parents {
            if !store.is_expanded(&id) {
                store.expand(Some(&id)).await?;
            }
        }
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
        return Ok(());
    }

    let unicode = config.display.unicode && !options.ascii && detect_capabilities().supports_unicode;
    let view = TreeView::new(unicode, config.display.indent);
    let rendered = view.render(&store);
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}
