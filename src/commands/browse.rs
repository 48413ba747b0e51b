//! `treenav browse`: interactive directory tree

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use treenav::config::Config;
use treenav::infrastructure::FsChildLoader;
use treenav::ui::terminal::detect_capabilities;
use treenav::ui::widgets::tree_view::{run_interactive, InteractiveOutcome, TreeView};
use treenav::TreeStore;

pub struct BrowseOptions {
    pub hidden: bool,
    pub multi: bool,
    pub ascii: bool,
}

pub async fn run(dir: &Path, options: BrowseOptions, config: &Config) -> Result<()> {
    let caps = detect_capabilities();
    if !caps.is_tty {
        bail!("browse needs an interactive terminal; use `treenav print` for scripted output");
    }

    let root = dir
        .canonicalize()
        .with_context(|| format!("cannot open {}", dir.display()))?;
    let loader = FsChildLoader::new(&root).show_hidden(options.hidden || config.loader.show_hidden);
    let nodes = loader
        .load_top_level()
        .await
        .with_context(|| format!("cannot list {}", root.display()))?;

    let mut view_options = config.view;
    view_options.multi_select |= options.multi;

    let mut store = TreeStore::builder()
        .tree_data(nodes)
        .shared_loader(Arc::new(loader.clone()))
        .options(view_options)
        .build()?;

    let unicode = config.display.unicode && caps.supports_unicode && !options.ascii;
    let view = TreeView::new(unicode, config.display.indent).width(usize::from(caps.width));
    let title = root.display().to_string();

    match run_interactive(&mut store, &view, &title, caps.supports_color).await? {
        InteractiveOutcome::Selected(ids) => {
            for id in ids {
                println!("{}", loader.resolve(&id).display());
            }
        }
        InteractiveOutcome::Cancelled => {}
    }
    Ok(())
}
