use stay_scout::catalog::Catalog;
use stay_scout::config::Config;
use stay_scout::enquiry::{ChatInbox, EnquiryForm};
use stay_scout::search::{FilterModel, PriceRange, SearchPath, QUICK_FILTERS};
use stay_scout::Session;

fn config_in(dir: &std::path::Path) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        score_seed: Some(2024),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_basic_search_is_exact_and_subset() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(&config_in(dir.path())).await.unwrap();

    let filter = FilterModel::default()
        .with_assisted(false)
        .with_price_range(PriceRange::new(5000, 10000).unwrap())
        .with_amenities(["wifi"]);
    let state = session.search.search(&filter).await.unwrap();
    assert_eq!(state.path, SearchPath::Catalog);

    let builtin = Catalog::builtin();
    let expected: Vec<&str> = builtin
        .listings()
        .iter()
        .filter(|l| (5000..=10000).contains(&l.price) && l.has_amenity("wifi"))
        .map(|l| l.id.as_str())
        .collect();
    assert!(!expected.is_empty());
    let got: Vec<&str> = state.outcome.results().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(got, expected);

    for result in state.outcome.results() {
        assert!((70..=100).contains(&result.match_score.unwrap()));
        assert!(result.description.ends_with("..."));
    }
}

#[tokio::test]
async fn test_quick_filter_goes_through_provider() {
    let dir = tempfile::tempdir().unwrap();
    let session = Session::open(&config_in(dir.path())).await.unwrap();

    let filter = QUICK_FILTERS[2].to_filter(Default::default());
    let state = session.search.search(&filter).await.unwrap();
    assert_eq!(state.path, SearchPath::Provider);
    assert!(state.outcome.error().is_none());
}

#[tokio::test]
async fn test_favorites_survive_sessions_and_notify_views() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let session = Session::open(&config).await.unwrap();
    let mut view = session.favorites.open_view();
    assert!(view.is_empty());

    assert!(session.favorites.toggle("7").unwrap());
    assert!(view.refresh());
    assert!(view.contains("7"));

    let later = Session::open(&config).await.unwrap();
    let titles: Vec<String> = later
        .favorites
        .listings(&later.catalog)
        .iter()
        .map(|l| l.title.clone())
        .collect();
    assert_eq!(titles, vec![later.catalog.get("7").unwrap().title.clone()]);

    assert!(!later.favorites.toggle("7").unwrap());
    assert!(later.favorites.ids().is_empty());
}

#[tokio::test]
async fn test_enquiries_materialize_once_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let sender = Session::open(&config).await.unwrap();
    let listing = sender.catalog.get("5").unwrap().clone();
    let form = EnquiryForm {
        name: "Kabir".into(),
        email: "kabir@example.com".into(),
        phone: "9000012345".into(),
        message: "Are meals included for vegetarians?".into(),
    };
    let first = sender
        .enquiries
        .submit(form.validate(&listing.id, &listing.title).unwrap())
        .unwrap();
    let second = sender
        .enquiries
        .submit(form.validate(&listing.id, &listing.title).unwrap())
        .unwrap();
    assert_ne!(first.storage_key(), second.storage_key());

    let reader = Session::open(&config).await.unwrap();
    let (inbox, report) = reader.open_inbox();
    assert_eq!(report.created.len(), 2);
    assert!(report.undeleted.is_empty());
    assert_eq!(inbox.contacts().iter().filter(|c| c.is_enquiry()).count(), 2);

    let mut again = ChatInbox::seeded(chrono::Utc::now());
    let report = again.materialize_pending(&reader.enquiries);
    assert!(report.created.is_empty());
    assert!(!again.contacts().iter().any(|c| c.is_enquiry()));
}
