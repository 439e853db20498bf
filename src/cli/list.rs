//! Listing commands (tree, flat list, sources, single file)

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snippets_view::config::Settings;
use snippets_view::presentation::{TreeItem, tree_item};
use snippets_view::{Dialect, Node, SnippetProvider, SnippetSource, SourceOrigin};

use super::{ViewArgs, build_provider};

/// List snippets: grouped by file, or flat when flatten is on
pub async fn list_command(
    workspaces: Vec<PathBuf>,
    settings: Settings,
    view: &ViewArgs,
    json: bool,
) -> Result<()> {
    let provider = build_provider(workspaces, view.apply(&settings));
    provider.set_active_language(view.language.clone()).await;
    let config = provider.config();

    let root = provider.get_children(None).await;
    if config.flatten {
        print_records(&provider, &root, json, 0)?;
        return Ok(());
    }

    if json {
        let mut files = Vec::new();
        for node in &root {
            let children = provider.get_children(Some(node)).await;
            let items: Vec<TreeItem> = children.iter().map(|c| tree_item(c, &config)).collect();
            files.push(serde_json::json!({
                "file": tree_item(node, &config),
                "snippets": items,
            }));
        }
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }

    if root.is_empty() {
        println!("No snippet files found.");
        println!();
        println!("Snippets are loaded from:");
        for folder in provider.locator().workspace_folders() {
            println!("  - {}", folder.join(".vscode").display());
        }
        println!("  - {}", provider.locator().global_dir().display());
        return Ok(());
    }

    for node in &root {
        let item = tree_item(node, &config);
        match &item.resource {
            Some(path) => println!("{} ({})", item.label, path.display()),
            None => println!("{}", item.label),
        }
        let children = provider.get_children(Some(node)).await;
        print_records(&provider, &children, false, 2)?;
    }
    Ok(())
}

/// List the snippet files that would be read
pub async fn sources_command(
    workspaces: Vec<PathBuf>,
    settings: Settings,
    extensions: bool,
    json: bool,
) -> Result<()> {
    let settings = Settings {
        flatten: false,
        include_extension_snippets: settings.include_extension_snippets || extensions,
        ..settings
    };
    let provider = build_provider(workspaces, settings);
    let sources: Vec<Arc<SnippetSource>> = provider
        .get_children(None)
        .await
        .into_iter()
        .filter_map(|node| match node {
            Node::Source(source) => Some(source),
            Node::Record(_) => None,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(());
    }

    if sources.is_empty() {
        println!("No snippet files found.");
        return Ok(());
    }
    for source in sources {
        println!("{:<40} {}", source.label, source.path.display());
    }
    Ok(())
}

/// Show the snippets of a single file
pub async fn show_command(
    workspaces: Vec<PathBuf>,
    settings: Settings,
    file: &Path,
    view: &ViewArgs,
    json: bool,
) -> Result<()> {
    let Some(dialect) = Dialect::from_path(file) else {
        bail!(
            "Not a snippet file (expected .json or .code-snippets): {}",
            file.display()
        );
    };
    let path = std::path::absolute(file)?;

    let provider = build_provider(workspaces, view.apply(&settings));
    provider.set_active_language(view.language.clone()).await;

    let node = Node::Source(Arc::new(SnippetSource::from_file(
        path,
        dialect,
        SourceOrigin::Global,
    )));
    let children = provider.get_children(Some(&node)).await;
    print_records(&provider, &children, json, 0)
}

fn print_records(
    provider: &SnippetProvider,
    nodes: &[Node],
    json: bool,
    indent: usize,
) -> Result<()> {
    let config = provider.config();

    if json {
        let records: Vec<_> = nodes.iter().filter_map(Node::as_record).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if nodes.is_empty() {
        println!("{:indent$}(no snippets)", "", indent = indent);
        return Ok(());
    }

    for node in nodes {
        let item = tree_item(node, &config);
        let prefix = node
            .as_record()
            .map(|r| r.prefix.as_vec().join(", "))
            .unwrap_or_default();
        match item.description {
            Some(scope) if !scope.is_empty() => println!(
                "{:indent$}{} [{}] {}",
                "",
                item.label,
                scope,
                prefix,
                indent = indent
            ),
            _ => println!("{:indent$}{} {}", "", item.label, prefix, indent = indent),
        }
    }
    Ok(())
}
