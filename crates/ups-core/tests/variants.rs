use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use ups_core::mock::{MockUps, VariantSeed, fixtures};
use ups_core::{UpsClient, VariantFilter};
use ups_schema::{
    IosCertificate, NewAndroidVariant, NewIosVariant, NewVariant, VariantKind, VariantType,
};

const WRONG_NAME: &str = "WRONG";

fn android_kind() -> VariantKind {
    VariantKind::Android {
        google_key: "123456".to_string(),
        project_number: Some("1234556".to_string()),
    }
}

fn ios_kind() -> VariantKind {
    VariantKind::Ios {
        production: false,
        certificate: Some("123".to_string()),
        password: None,
    }
}

/// Ten applications with known ids.
fn setup() -> (MockUps, UpsClient, Vec<String>) {
    let mock = MockUps::new();
    let ids = fixtures::generate_ids(10);
    mock.seed_applications(fixtures::application_seeds_with_ids(&ids))
        .unwrap();
    let client = UpsClient::new(mock.clone());
    (mock, client, ids)
}

#[tokio::test]
async fn test_create_android_variant() {
    let (_mock, client, ids) = setup();
    let payload = NewAndroidVariant::new("Android Variant", "123456").with_project_number("1234556");

    let variant = client
        .variants(&ids[7])
        .create(&payload.clone().into())
        .await
        .unwrap();

    assert_eq!(variant.name, payload.name);
    assert_eq!(variant.variant_type(), VariantType::Android);
    assert_eq!(variant.kind, android_kind());
    assert_eq!(variant.developer, "admin");
    assert!(!variant.variant_id.is_empty());
    assert!(!variant.secret.is_empty());
}

#[tokio::test]
async fn test_create_ios_variant() {
    let (_mock, client, ids) = setup();
    let certificate = IosCertificate::new("mockcert.p12", b"not really a p12".to_vec());
    let payload = NewIosVariant::new("test", certificate, "123pwd123");

    let variant = client
        .variants(&ids[7])
        .create(&NewVariant::Ios(payload))
        .await
        .unwrap();

    assert_eq!(variant.name, "test");
    assert_eq!(variant.variant_type(), VariantType::Ios);
    assert_eq!(
        variant.kind,
        VariantKind::Ios {
            production: false,
            certificate: Some(BASE64_STANDARD.encode(b"not really a p12")),
            password: Some("123pwd123".to_string()),
        }
    );
}

#[tokio::test]
async fn test_created_variant_is_listed_under_its_app() {
    let (_mock, client, ids) = setup();
    let created = client
        .variants(&ids[2])
        .create(&NewAndroidVariant::new("Droid", "key").into())
        .await
        .unwrap();

    let found = client
        .variants(&ids[2])
        .find(&VariantFilter::default())
        .await
        .unwrap();
    assert_eq!(found, vec![created]);

    let elsewhere = client
        .variants(&ids[3])
        .find(&VariantFilter::default())
        .await
        .unwrap();
    assert!(elsewhere.is_empty());
}

#[tokio::test]
async fn test_create_under_missing_app_is_not_found() {
    let (_mock, client, _ids) = setup();
    let err = client
        .variants("ghost")
        .create(&NewAndroidVariant::new("Droid", "key").into())
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "{err}");
}

#[tokio::test]
async fn test_find_all_variants_of_each_app() {
    let (mock, client, ids) = setup();
    let variants1 = mock
        .seed_variants(&ids[2], fixtures::variant_seeds(35, &android_kind()))
        .unwrap();
    let variants8 = mock
        .seed_variants(&ids[8], fixtures::variant_seeds(12, &ios_kind()))
        .unwrap();

    assert_eq!(client.variants(&ids[2]).find_all().await.unwrap(), variants1);
    assert_eq!(client.variants(&ids[8]).find_all().await.unwrap(), variants8);
    assert!(client.variants(&ids[5]).find_all().await.unwrap().is_empty());

    // Unfiltered find is the first page only.
    let preview = client
        .variants(&ids[2])
        .find(&VariantFilter::default())
        .await
        .unwrap();
    assert_eq!(preview, variants1[..10]);
}

#[tokio::test]
async fn test_find_given_variant() {
    let (mock, client, ids) = setup();
    let seeded = mock
        .seed_variants(&ids[2], fixtures::variant_seeds(15, &android_kind()))
        .unwrap();
    let wanted = &seeded[12];

    let found = client
        .variants(&ids[2])
        .find(&VariantFilter::by_id(&wanted.variant_id))
        .await
        .unwrap();
    assert_eq!(found, vec![wanted.clone()]);

    let missing = client
        .variants(&ids[2])
        .find(&VariantFilter::by_id("v-2:2"))
        .await
        .unwrap();
    assert!(missing.is_empty());
}

#[tokio::test]
async fn test_find_by_wrong_name_is_empty() {
    let (mock, client, ids) = setup();
    mock.seed_variants(&ids[2], fixtures::variant_seeds(15, &android_kind()))
        .unwrap();

    let found = client
        .variants(&ids[2])
        .find(&VariantFilter::by_name(WRONG_NAME))
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_find_by_type_across_pages() {
    let (mock, client, ids) = setup();
    let seeds = (0..30).map(|i| {
        let kind = if i % 4 == 0 { ios_kind() } else { android_kind() };
        VariantSeed::new(format!("TEST VARIANT {i}"), kind)
    });
    let seeded = mock.seed_variants(&ids[4], seeds).unwrap();

    let android = client
        .variants(&ids[4])
        .find(&VariantFilter::by_type(VariantType::Android))
        .await
        .unwrap();
    let expected: Vec<_> = seeded
        .into_iter()
        .filter(|v| v.variant_type() == VariantType::Android)
        .collect();
    assert_eq!(android.len(), 22);
    assert_eq!(android, expected);
}

#[tokio::test]
async fn test_scan_under_missing_app_is_not_found() {
    let (_mock, client, _ids) = setup();
    let err = client
        .variants("ghost")
        .find(&VariantFilter::by_name("x"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_variant() {
    let (mock, client, ids) = setup();
    let seeded = mock
        .seed_variants(&ids[2], fixtures::variant_seeds(3, &android_kind()))
        .unwrap();
    let admin = client.variants(&ids[2]);
    let target = &seeded[1].variant_id;

    admin.delete(target).await.unwrap();

    assert!(admin.get(target).await.unwrap().is_none());
    assert!(admin.find(&VariantFilter::by_id(target)).await.unwrap().is_empty());
    let left = admin.find_all().await.unwrap();
    assert_eq!(left, [seeded[0].clone(), seeded[2].clone()]);

    let err = admin.delete(target).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_deleting_app_makes_its_variants_unreachable() {
    let (mock, client, ids) = setup();
    mock.seed_variants(&ids[1], fixtures::variant_seeds(3, &android_kind()))
        .unwrap();

    client.applications().delete(&ids[1]).await.unwrap();

    let err = client.variants(&ids[1]).find_all().await.unwrap_err();
    assert!(err.is_not_found());
}
