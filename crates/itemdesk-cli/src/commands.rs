// Subcommand implementations
use std::path::Path;

use anyhow::{bail, Context};
use itemdesk_core::{CategoryGroup, Config, HttpBackend, Item, ItemId, ItemStore};
use itemdesk_tui::App;
use serde::Serialize;

/// File values over defaults, then `--api-url` / `ITEMDESK_API_URL` over the file
pub fn load_config(path: &Path, api_url: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load_from(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    if let Some(url) = api_url {
        config.api.base_url = url;
    }
    Ok(config)
}

fn open_store(config: &Config) -> anyhow::Result<ItemStore<HttpBackend>> {
    let backend = HttpBackend::from_config(&config.api)
        .with_context(|| format!("cannot use API URL {}", config.api.base_url))?;
    tracing::debug!("Using items endpoint {}", backend.base_url());
    Ok(ItemStore::new(backend))
}

#[derive(Serialize)]
struct GroupOutput<'a> {
    category: &'a str,
    items: Vec<&'a Item>,
}

/// Plain-text rendering: category heading, then indented `#id name` lines
fn format_groups(groups: &[CategoryGroup<'_>]) -> String {
    let mut out = String::new();
    for group in groups {
        out.push_str(group.category);
        out.push('\n');
        for item in &group.items {
            out.push_str(&format!("  #{} {}\n", item.id, item.name));
        }
    }
    out
}

pub async fn list(
    config: &Config,
    filter: Option<String>,
    search: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    match search {
        Some(query) => store.load_matching(&query).await?,
        None => store.load().await?,
    }
    if let Some(filter) = filter {
        store.set_filter(filter);
    }

    let groups = store.visible_groups();
    if json {
        let output: Vec<GroupOutput> = groups
            .iter()
            .map(|g| GroupOutput {
                category: g.category,
                items: g.items.clone(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if groups.is_empty() {
        println!("No items.");
    } else {
        print!("{}", format_groups(&groups));
    }

    Ok(())
}

pub async fn add(config: &Config, name: &str, category: &str) -> anyhow::Result<()> {
    let mut store = open_store(config)?;

    match store.submit(name, category).await? {
        Some(item) => println!("Added #{} {} ({})", item.id, item.name, item.category),
        None => bail!("name and category must both be non-empty"),
    }
    Ok(())
}

pub async fn update(config: &Config, id: ItemId, name: &str, category: &str) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    store.load().await?;

    let Some(item) = store.find(&id).cloned() else {
        bail!("no item with id {}", id);
    };
    store.begin_edit(&item);

    match store.submit(name, category).await? {
        Some(item) => println!("Updated #{} {} ({})", item.id, item.name, item.category),
        None => bail!("name and category must both be non-empty"),
    }
    Ok(())
}

pub async fn delete(config: &Config, id: ItemId) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    store.remove(&id).await?;
    println!("Deleted #{}", id);
    Ok(())
}

pub async fn tui(config: &Config) -> anyhow::Result<()> {
    let app = App::new(open_store(config)?).with_confirm_delete(config.ui.confirm_delete);
    itemdesk_tui::run_tui(app).await
}

pub fn show_config(config: &Config) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

pub fn init_config(config: &Config, path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    config.save_to(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use itemdesk_core::visible_groups;
    use mockito::Server;
    use tempfile::TempDir;

    fn config_for(server: &Server) -> Config {
        let mut config = Config::default();
        config.api.base_url = format!("{}/api/items/", server.url());
        config
    }

    #[test]
    fn test_format_groups() {
        let items = vec![
            Item::new(1, "Hammer", "Tools"),
            Item::new(2, "Apple", "Food"),
            Item::new(3, "Wrench", "Tools"),
        ];
        let groups = visible_groups(&items, "");

        assert_eq!(
            format_groups(&groups),
            "Tools\n  #1 Hammer\n  #3 Wrench\nFood\n  #2 Apple\n"
        );
    }

    #[test]
    fn test_json_output_shape() {
        let items = vec![Item::new(1, "Hammer", "Tools")];
        let groups = visible_groups(&items, "");
        let output: Vec<GroupOutput> = groups
            .iter()
            .map(|g| GroupOutput {
                category: g.category,
                items: g.items.clone(),
            })
            .collect();

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!([
                {"category": "Tools", "items": [{"id": 1, "name": "Hammer", "category": "Tools"}]}
            ])
        );
    }

    #[test]
    fn test_load_config_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        // Nothing on disk: defaults
        let config = load_config(&path, None).unwrap();
        assert_eq!(config.api.base_url, Config::default().api.base_url);

        // File beats defaults
        std::fs::write(&path, "[api]\nbase_url = \"http://file.test/api/items/\"\n").unwrap();
        let config = load_config(&path, None).unwrap();
        assert_eq!(config.api.base_url, "http://file.test/api/items/");

        // Flag or env beats the file, other file values survive
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://file.test/api/items/\"\n[ui]\nconfirm_delete = false\n",
        )
        .unwrap();
        let config = load_config(&path, Some("http://flag.test/api/items/".into())).unwrap();
        assert_eq!(config.api.base_url, "http://flag.test/api/items/");
        assert!(!config.ui.confirm_delete);
    }

    #[test]
    fn test_init_config_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# hand-written\n").unwrap();

        let mut config = Config::default();
        config.api.base_url = "http://new.test/api/items/".into();

        assert!(init_config(&config, &path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hand-written\n");

        init_config(&config, &path, true).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_init_config_writes_fresh_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("itemdesk").join("config.toml");

        init_config(&Config::default(), &path, false).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails_without_put() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", "/api/items/")
            .with_status(200)
            .with_body(r#"[{"id":1,"name":"Hammer","category":"Tools"}]"#)
            .create_async()
            .await;
        let put = server
            .mock("PUT", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = update(&config_for(&server), ItemId::Number(5), "Saw", "Tools")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no item with id 5"));
        put.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_known_id_puts_new_values() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", "/api/items/")
            .with_status(200)
            .with_body(r#"[{"id":1,"name":"Hammer","category":"Tools"}]"#)
            .create_async()
            .await;
        let put = server
            .mock("PUT", "/api/items/1/")
            .with_status(200)
            .with_body(r#"{"id":1,"name":"Hammer XL","category":"Tools"}"#)
            .create_async()
            .await;

        update(&config_for(&server), ItemId::Number(1), "Hammer XL", "Tools")
            .await
            .unwrap();
        put.assert_async().await;
    }
}
