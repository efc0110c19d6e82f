//! Job overview read back from real job directories

use rollforge::adapters::registry::{
    MemoryStationStore, Registration, RegistrySnapshot, SnapshotRegistry,
};
use rollforge::adapters::renderer::TextRenderer;
use rollforge::core::distribution::StationDistributor;
use rollforge::core::job::{handle_job_failure, InputArguments, Job, JobContext};
use rollforge::core::overview::{JobOverview, JobState};
use rollforge::domain::{
    Center, CenterId, ElectionId, Gender, Individual, NationalId, Office, OfficeId, Phase,
    RollError,
};
use tempfile::TempDir;

fn center_id(id: u32) -> CenterId {
    CenterId::new(id).unwrap()
}

fn registry() -> SnapshotRegistry {
    let registrations = (0..40u64)
        .map(|i| Registration {
            center_id: center_id(if i < 30 { 11001 } else { 22001 }),
            individual: Individual::new(
                NationalId::new(300_000_000_000 + i),
                format!("N{i:03}"),
                "F",
                "G",
                "H",
                if i % 2 == 0 { Gender::Male } else { Gender::Female },
            ),
        })
        .collect();

    SnapshotRegistry::new(RegistrySnapshot {
        current_election: Some(ElectionId::new(1)),
        offices: vec![
            Office::new(OfficeId::new(2), "Misrata"),
            Office::new(OfficeId::new(5), "Sabha"),
        ],
        centers: vec![
            Center::new(center_id(11001), "School", Some(OfficeId::new(2))),
            Center::new(center_id(11005), "Empty school", Some(OfficeId::new(2))),
            Center::new(center_id(22001), "Clinic", Some(OfficeId::new(5))),
        ],
        registrations,
    })
}

fn job(dir: &std::path::Path, ids: &[u32], forgive_no_voters: bool) -> Job {
    let mut arguments = InputArguments::new(Phase::Exhibitions);
    arguments.forgive_no_voters = forgive_no_voters;
    let centers = ids
        .iter()
        .map(|id| {
            let office = if *id >= 22000 { 5 } else { 2 };
            Center::new(center_id(*id), "Center", Some(OfficeId::new(office)))
        })
        .collect();
    Job::new(Phase::Exhibitions, centers, arguments, "clerk", dir).unwrap()
}

#[test]
fn test_finished_job_overview() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("2026-10-16.09-30-00-000001-clerk");
    let registry = registry();
    let store = MemoryStationStore::new();
    let renderer = TextRenderer::default();
    let context = JobContext {
        registry: &registry,
        station_store: &store,
        renderer: &renderer,
        distributor: StationDistributor::default(),
    };

    let manifest = job(&path, &[22001, 11005, 11001], true).run(&context).unwrap();

    let overview = JobOverview::load(&path).unwrap();
    assert_eq!(overview.dirname, "2026-10-16.09-30-00-000001-clerk");
    let finished = match overview.state {
        JobState::Finished(ref finished) => finished,
        ref other => panic!("unexpected state: {other:?}"),
    };

    assert_eq!(finished.phase, Phase::Exhibitions);
    assert_eq!(finished.user, "clerk");
    assert_eq!(finished.n_files, 4);
    assert_eq!(finished.n_pages, manifest.total_pdf_page_count);
    assert_eq!(finished.office_ids(), vec![OfficeId::new(2), OfficeId::new(5)]);
    assert_eq!(finished.start_time.timestamp_subsec_nanos(), 0);

    let office_2: Vec<&str> = finished.files[&OfficeId::new(2)]
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(office_2, vec!["11001_f.txt", "11001_m.txt"]);
    assert!(finished.files[&OfficeId::new(2)]
        .iter()
        .all(|f| f.center_id() == Some(center_id(11001)) && f.n_bytes > 0));

    // 11005 was forgiven for having no registrants and produced no files
    let (bins, n_empty) = finished.bin_center_ids();
    assert_eq!(n_empty, 1);
    assert_eq!(
        bins["110"],
        vec![
            (center_id(11001), Some(OfficeId::new(2))),
            (center_id(11005), None),
        ]
    );
    assert_eq!(bins["220"], vec![(center_id(22001), Some(OfficeId::new(5)))]);

    let summary = overview.format_summary();
    assert!(summary.contains("clerk"));
    assert!(summary.contains("Office 2 Misrata: 2 files"));
    assert!(summary.contains("Centers without files: 1"));
}

#[test]
fn test_in_progress_then_failed() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("job");
    let _job = job(&path, &[11001], false);

    assert_eq!(JobOverview::load(&path).unwrap().state, JobState::InProgress);

    let err = RollError::MissingPrerequisites {
        no_office: vec![],
        no_registrants: vec![center_id(11005)],
    };
    handle_job_failure(&err, &path);

    match JobOverview::load(&path).unwrap().state {
        JobState::Failed(message) => assert_eq!(message, err.to_string()),
        other => panic!("unexpected state: {other:?}"),
    }
}
