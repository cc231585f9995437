use boletas::application::config::CompanyConfigStore;
use boletas::domain::company::CompanyProfile;
use boletas::infrastructure::json_file::JsonFileConfigRepository;
use std::sync::Arc;
use tempfile::tempdir;

mod common;

async fn open(settings: &boletas::settings::Settings) -> CompanyConfigStore {
    CompanyConfigStore::open(Box::new(JsonFileConfigRepository::new(
        settings.config_file(),
    )))
    .await
    .unwrap()
}

#[tokio::test]
async fn test_sequence_survives_restart() {
    let dir = tempdir().unwrap();
    let settings = common::settings(dir.path());

    let issued = {
        let store = open(&settings).await;
        let mut issued = Vec::new();
        for _ in 0..25 {
            issued.push(store.next_document_number().await.unwrap());
        }
        issued
    };

    assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(issued.last().unwrap().as_str(), "BOL-000025");

    let store = open(&settings).await;
    assert_eq!(store.sequence().await.last_number, 25);
    assert_eq!(
        store.next_document_number().await.unwrap().as_str(),
        "BOL-000026"
    );
}

#[tokio::test]
async fn test_missing_file_loads_defaults_without_writing() {
    let dir = tempdir().unwrap();
    let settings = common::settings(dir.path());

    let store = open(&settings).await;
    assert_eq!(store.profile().await, CompanyProfile::default());
    assert!(!settings.config_file().exists());

    store.save().await.unwrap();
    assert!(settings.config_file().exists());
}

#[tokio::test]
async fn test_profile_update_keeps_sequence() {
    let dir = tempdir().unwrap();
    let settings = common::settings(dir.path());

    {
        let store = open(&settings).await;
        store.next_document_number().await.unwrap();
        store
            .set_profile(CompanyProfile {
                name: "Imprenta Potosí".to_string(),
                tax_id: "99887766".to_string(),
                ..CompanyProfile::default()
            })
            .await
            .unwrap();
    }

    let store = open(&settings).await;
    assert_eq!(store.profile().await.name, "Imprenta Potosí");
    assert_eq!(store.sequence().await.last_number, 1);
}

#[tokio::test]
async fn test_concurrent_numbering_against_file() {
    let dir = tempdir().unwrap();
    let settings = common::settings(dir.path());
    let store = Arc::new(open(&settings).await);

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.next_document_number().await.unwrap() })
        })
        .collect();

    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap());
    }
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), 20);

    let reopened = open(&settings).await;
    assert_eq!(reopened.sequence().await.last_number, 20);
}
