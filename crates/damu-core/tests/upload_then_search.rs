//! Integration test: drive the upload and gallery controllers against an
//! in-memory stand-in for the asset API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use damu_core::{
    Asset, AssetId, ClientConfig, FileInfo, FilterSet, GalleryController, GalleryView, ListQuery,
    UploadController, parse_tags,
};

/// Chunk size of the simulated upload body.
const CHUNK: u64 = 256 * 1024;

/// Minimal asset store that applies list filters the way the server does.
struct FakeAssetApi {
    assets: Vec<Asset>,
    now: DateTime<Utc>,
}

impl FakeAssetApi {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            assets: Vec::new(),
            now,
        }
    }

    /// Accept an upload, reporting progress chunk by chunk.
    fn upload(
        &mut self,
        file: &FileInfo,
        tags: Option<&str>,
        mut on_progress: impl FnMut(u64, u64),
    ) -> Asset {
        let mut sent = 0;
        while sent < file.size {
            sent = (sent + CHUNK).min(file.size);
            on_progress(sent, file.size);
        }
        let asset = Asset {
            id: AssetId::new(format!("asset-{}", self.assets.len() + 1)),
            original_name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size: file.size,
            upload_date: self.now,
            tags: tags.map(parse_tags).unwrap_or_default(),
        };
        self.assets.push(asset.clone());
        asset
    }

    fn list(&self, query: &ListQuery) -> Vec<Asset> {
        self.assets
            .iter()
            .filter(|a| {
                query
                    .file_type
                    .as_deref()
                    .is_none_or(|t| a.mime_type.starts_with(t))
            })
            .filter(|a| {
                query.upload_date.as_deref().is_none_or(|d| {
                    a.upload_date
                        .with_timezone(&Local)
                        .date_naive()
                        .format("%Y-%m-%d")
                        .to_string()
                        == d
                })
            })
            .filter(|a| {
                query.tags.as_deref().is_none_or(|wanted| {
                    parse_tags(wanted)
                        .iter()
                        .any(|w| a.tags.iter().any(|t| t.contains(w.as_str())))
                })
            })
            .cloned()
            .collect()
    }
}

#[test]
fn upload_two_megabyte_image_then_find_it_by_tag() {
    let now = Utc::now();
    let mut api = FakeAssetApi::new(now);
    let mut uploader = UploadController::<FileInfo>::new(&ClientConfig::default());
    let mut gallery = GalleryController::new();

    // Initial load: empty gallery.
    let request = gallery.refetch();
    let listed = api.list(&request.query);
    gallery.on_list_loaded(request.generation, listed);
    assert_eq!(gallery.view(), GalleryView::Empty);

    // Pick and submit a 2 MB image with tags.
    let file = FileInfo::new("sunset.jpg", "image/jpeg", 2 * 1024 * 1024);
    uploader.select_file(file).unwrap();
    uploader.set_tags("a, b");
    let upload = uploader.submit().unwrap();
    assert_eq!(upload.tags.as_deref(), Some("a, b"));

    let mut observed = vec![uploader.progress()];
    api.upload(&upload.file, upload.tags.as_deref(), |loaded, total| {
        uploader.on_progress(loaded, total);
        observed.push(uploader.progress());
    });
    assert_eq!(observed.first(), Some(&0));
    assert_eq!(observed.last(), Some(&100));
    assert!(
        observed.windows(2).all(|w| w[0] <= w[1]),
        "progress went backwards: {observed:?}"
    );

    // Completion: the form resets and the gallery refreshes.
    uploader.on_success();
    assert_eq!(uploader.selected(), None);
    assert_eq!(uploader.progress(), 0);

    let request = gallery.refetch();
    let listed = api.list(&request.query);
    assert!(gallery.on_list_loaded(request.generation, listed));

    let GalleryView::Ready(assets) = gallery.view() else {
        panic!("expected assets after upload, got {:?}", gallery.view());
    };
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].original_name, "sunset.jpg");
    assert_eq!(assets[0].tags, vec!["a", "b"]);

    // The tag filter finds it, an unrelated tag does not.
    let request = gallery.set_tags("b").unwrap();
    let listed = api.list(&request.query);
    gallery.on_list_loaded(request.generation, listed);
    assert_eq!(gallery.assets().len(), 1);

    let request = gallery.set_tags("zebra").unwrap();
    let listed = api.list(&request.query);
    gallery.on_list_loaded(request.generation, listed);
    assert_eq!(gallery.view(), GalleryView::Empty);
}

#[test]
fn type_and_today_filters_produce_expected_parameters() {
    let mut gallery = GalleryController::new();
    gallery.set_file_type("image").unwrap();

    let picked = Local::now();
    let today = picked.date_naive();
    let filters = gallery.filters().clone().with_upload_date_at(Some(&picked));
    let request = gallery.set_filters(filters).unwrap();

    let expected_date = today.format("%Y-%m-%d").to_string();
    assert_eq!(
        request.query.pairs(),
        vec![("type", "image"), ("uploadDate", expected_date.as_str())]
    );
}

#[test]
fn date_serialization_ignores_time_of_day() {
    let day = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
    for (h, m) in [(0, 0), (1, 30), (12, 0), (23, 59)] {
        let Some(picked) = Local
            .with_ymd_and_hms(2024, 11, 3, h, m, 0)
            .earliest()
        else {
            // Local time does not exist (DST gap); nothing to check.
            continue;
        };
        let filters = FilterSet::default().with_upload_date_at(Some(&picked));
        assert_eq!(filters.upload_date, Some(day));
        assert_eq!(
            ListQuery::from_filters(&filters).upload_date.as_deref(),
            Some("2024-11-03")
        );
    }
}

#[test]
fn failed_refresh_keeps_previous_results_until_retry() {
    let mut api = FakeAssetApi::new(Utc::now());
    api.upload(&FileInfo::new("doc.pdf", "application/pdf", 10), None, |_, _| {});
    let mut gallery = GalleryController::new();

    let request = gallery.refetch();
    gallery.on_list_loaded(request.generation, api.list(&request.query));
    assert_eq!(gallery.assets().len(), 1);

    let request = gallery.refetch();
    gallery.on_list_failed(
        request.generation,
        &damu_core::ApiError::Network("offline".into()),
    );
    assert!(gallery.error().is_some());
    assert_eq!(gallery.assets().len(), 1);

    let retry = gallery.refetch();
    gallery.on_list_loaded(retry.generation, api.list(&retry.query));
    assert_eq!(gallery.error(), None);
}
