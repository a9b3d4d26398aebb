use affinity_core::Node;
use affinity_placement::{StaticLister, resolve};
use serde::Serialize;

use super::input::{load_config, load_nodes};

#[derive(Debug, Serialize)]
struct PoolEntry<'a> {
    index: usize,
    name: &'a str,
    hostname: Option<&'a str>,
}

pub fn pool(config: Option<&str>, nodes: &str, format: &str) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let inventory = load_nodes(nodes)?;
    let total = inventory.len();

    let pool = resolve(&StaticLister::new(inventory), &config.pool)?;
    print!("{}", render(&pool, &config.pool.hostname_label, total, format)?);
    Ok(())
}

fn render(
    pool: &[Node],
    hostname_label: &str,
    total: usize,
    format: &str,
) -> anyhow::Result<String> {
    let entries: Vec<PoolEntry<'_>> = pool
        .iter()
        .enumerate()
        .map(|(index, node)| PoolEntry {
            index,
            name: &node.name,
            hostname: node.label(hostname_label),
        })
        .collect();

    match format {
        "json" => Ok(format!("{}\n", serde_json::to_string_pretty(&entries)?)),
        _ => {
            let mut out = format!("{} of {} nodes eligible\n", entries.len(), total);
            for e in &entries {
                out.push_str(&format!(
                    "{:>4}  {:<32} {}\n",
                    e.index,
                    e.name,
                    e.hostname.unwrap_or("-")
                ));
            }
            Ok(out)
        }
    }
}
