use gallery_source::album::Collection;
use gallery_source::cloudinary::{
    display_url, filter_images_by_collection, resource_to_image, CloudinaryClient,
    CloudinaryGallery, ImageListResponse,
};
use gallery_source::config::CloudinarySettings;
use gallery_source::contract::MockMediaListing;
use gallery_source::format::{SortKey, SortOptions, SortOrder};
use gallery_source::store::{GetImagesOptions, ImageStore};
use gallery_source::MappingError;

const LISTING: &str = r#"{
  "resources": [
    {
      "public_id": "portfolio/dunes",
      "resource_type": "image",
      "format": "jpg",
      "width": 3000,
      "height": 2000,
      "created_at": "2024-02-01T10:00:00Z",
      "asset_folder": "Deserts",
      "context": { "custom": { "caption": "Dunes", "alt": "Sand dunes at dusk" } }
    },
    {
      "public_id": "portfolio/waves",
      "resource_type": "video",
      "format": "mp4",
      "width": 1920,
      "height": 1080,
      "created_at": "2023-08-12T08:00:00Z",
      "asset_folder": "Coast"
    },
    {
      "public_id": "portfolio/broken",
      "resource_type": "image",
      "width": 100,
      "height": 100,
      "asset_folder": "deserts"
    },
    {
      "public_id": "portfolio/oasis",
      "resource_type": "image",
      "format": "png",
      "width": 800,
      "height": 600,
      "asset_folder": "Deserts",
      "context": { "custom": { "caption": "Oasis" } }
    },
    {
      "public_id": "loose",
      "format": "webp",
      "width": 10,
      "height": 10,
      "asset_folder": ""
    }
  ]
}"#;

fn listing() -> ImageListResponse {
    serde_json::from_str(LISTING).expect("fixture listing parses")
}

fn gallery() -> CloudinaryGallery<MockMediaListing> {
    let mut mock = MockMediaListing::new();
    mock.expect_list_resources().returning(|| Ok(listing()));
    CloudinaryGallery::new(mock, "demo-cloud".to_string())
}

#[test]
fn test_display_url_only_images_use_image_upload() {
    let resources = listing().resources;

    assert_eq!(
        display_url("demo-cloud", &resources[0]),
        "https://res.cloudinary.com/demo-cloud/image/upload/portfolio/dunes"
    );
    assert_eq!(
        display_url("demo-cloud", &resources[1]),
        "https://res.cloudinary.com/demo-cloud/video/upload/portfolio/waves"
    );
    assert_eq!(
        display_url("demo-cloud", &resources[4]),
        "https://res.cloudinary.com/demo-cloud/video/upload/loose"
    );

    let mut raw = resources[0].clone();
    raw.resource_type = Some("raw".into());
    assert_eq!(
        display_url("demo-cloud", &raw),
        "https://res.cloudinary.com/demo-cloud/video/upload/portfolio/dunes"
    );
}

#[test]
fn test_resource_to_image_maps_context_and_folder() {
    let resources = listing().resources;

    let dunes = resource_to_image(&resources[0], "demo-cloud").unwrap();
    assert_eq!(dunes.title, "Dunes");
    assert_eq!(dunes.description, "Sand dunes at dusk");
    assert_eq!(dunes.collections, vec!["Deserts"]);
    assert_eq!(dunes.format, "jpg");
    assert_eq!((dunes.width, dunes.height), (3000, 2000));
    assert_eq!(dunes.thumbnail, dunes.src);

    let waves = resource_to_image(&resources[1], "demo-cloud").unwrap();
    assert_eq!(waves.title, "");
    assert_eq!(waves.description, "");

    let loose = resource_to_image(&resources[4], "demo-cloud").unwrap();
    assert!(loose.collections.is_empty());

    assert_eq!(
        resource_to_image(&resources[2], "demo-cloud").unwrap_err(),
        MappingError::MissingFormat {
            asset_id: "portfolio/broken".into()
        }
    );
}

#[test]
fn test_filter_images_by_collection_matches_any_tag_case_insensitively() {
    let resources = listing().resources;
    let images: Vec<_> = resources
        .iter()
        .filter_map(|r| resource_to_image(r, "c").ok())
        .collect();

    let deserts = filter_images_by_collection(images.clone(), Some("DESERTS"));
    let titles: Vec<&str> = deserts.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Dunes", "Oasis"]);

    assert_eq!(filter_images_by_collection(images.clone(), None).len(), images.len());
}

#[tokio::test]
async fn test_get_images_skips_broken_resources_and_sorts() {
    let options = GetImagesOptions {
        collection: None,
        sort: SortOptions {
            sort_by: Some(SortKey::Date),
            order: SortOrder::Asc,
        },
    };

    let images = gallery().get_images(&options).await.unwrap();

    let ids: Vec<&str> = images
        .iter()
        .map(|i| i.src.rsplit("/upload/").next().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["portfolio/waves", "portfolio/dunes", "portfolio/oasis", "loose"]
    );
}

#[tokio::test]
async fn test_get_images_for_collection() {
    let images = gallery()
        .get_images(&GetImagesOptions::for_collection("coast"))
        .await
        .unwrap();

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].format, "mp4");
}

#[tokio::test]
async fn test_get_collections_lists_folders_once_in_first_seen_order() {
    let collections = gallery().get_collections(&[]).await.unwrap();
    assert_eq!(
        collections,
        vec![Collection::named("Deserts"), Collection::named("Coast")]
    );

    let filtered = gallery()
        .get_collections(&["DESERTS".to_string()])
        .await
        .unwrap();
    assert_eq!(filtered, vec![Collection::named("Coast")]);
}

#[test]
fn test_client_list_path() {
    let client = CloudinaryClient::new(&CloudinarySettings {
        cloud_name: "demo-cloud".into(),
        list_tag: "public".into(),
    });

    assert_eq!(client.list_path(), "/demo-cloud/any/list/public.json");
}
