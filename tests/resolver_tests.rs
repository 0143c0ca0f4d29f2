use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use phid_handles::handler::{builtin, StaticLoaderFactory, NO_PROJECT, UP_FOR_GRABS};
use phid_handles::records::{
    ArcanistProjectRecord, BlogRecord, CommitRecord, ConfigEntryRecord, DocumentStatus,
    FileRecord, MacroRecord, MailingListRecord, MockRecord, OwnersPackageRecord, PasteRecord,
    PostRecord, ProjectRecord, QuestionRecord, RepositoryRecord, RevisionRecord, RevisionStatus,
    TaskRecord, TaskStatus, TransactionRecord, UserRecord, Vcs, WikiDocumentRecord,
    DEFAULT_PROFILE_IMAGE_URI,
};
use phid_handles::store::{MemoryStatusStore, MemoryStore};
use phid_handles::{
    registry, Handle, HandleConfig, HandleError, HandleMap, HandleResolver, HandleStatus,
    HandlerRegistry, LoaderFactory, LoaderKey, ObjectHandleLoader, Phid, PhidType,
    ResolverConfig, Viewer,
};
use serde_json::{json, Value};

struct Fixture {
    tasks: Arc<MemoryStore<TaskRecord>>,
    users: Arc<MemoryStore<UserRecord>>,
    files: Arc<MemoryStore<FileRecord>>,
    statuses: Arc<MemoryStatusStore>,
    projects: Arc<MemoryStore<ProjectRecord>>,
    pastes: Arc<MemoryStore<PasteRecord>>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            tasks: Arc::new(MemoryStore::with_objects([
                task("PHID-TASK-abc", 42, "Fix bug", TaskStatus::Open),
                task("PHID-TASK-def", 43, "Old bug", TaskStatus::Resolved),
            ])),
            users: Arc::new(MemoryStore::with_objects([
                user("PHID-USER-alice", "alice", Some("PHID-FILE-alice")),
                user("PHID-USER-bob", "bob", None),
            ])),
            files: Arc::new(MemoryStore::with_objects([FileRecord {
                phid: Phid::new("PHID-FILE-alice"),
                id: 1,
                name: "alice.png".into(),
                mime_type: "image/png".into(),
                best_uri: "/file/data/alice.png".into(),
            }])),
            statuses: Arc::new(MemoryStatusStore::new()),
            projects: Arc::new(MemoryStore::with_objects([ProjectRecord {
                phid: Phid::new("PHID-PROJ-secret"),
                id: 5,
                name: "Secret".into(),
            }])),
            pastes: Arc::new(MemoryStore::new()),
        }
    }

    fn handlers(&self) -> Vec<Arc<dyn phid_handles::TypeHandler>> {
        vec![
            builtin::tasks(self.tasks.clone()),
            builtin::users(self.users.clone(), self.files.clone(), self.statuses.clone()),
            builtin::files(self.files.clone()),
            builtin::projects(self.projects.clone()),
            builtin::pastes(self.pastes.clone()),
        ]
    }

    fn resolver(&self) -> HandleResolver {
        let registry = HandlerRegistry::with_handlers(self.handlers()).unwrap();
        HandleResolver::new(Arc::new(registry))
    }

    fn resolver_with(&self, configure: impl FnOnce(&mut HandlerRegistry)) -> HandleResolver {
        let mut registry = HandlerRegistry::with_handlers(self.handlers()).unwrap();
        configure(&mut registry);
        HandleResolver::with_config(
            Arc::new(registry),
            ResolverConfig {
                max_concurrent_groups: 2,
            },
        )
    }
}

fn task(phid: &str, id: u64, title: &str, status: TaskStatus) -> TaskRecord {
    TaskRecord {
        phid: Phid::new(phid),
        id,
        title: title.into(),
        status,
    }
}

fn user(phid: &str, username: &str, image: Option<&str>) -> UserRecord {
    UserRecord {
        phid: Phid::new(phid),
        id: 7,
        username: username.into(),
        real_name: "Real Name".into(),
        profile_image_phid: image.map(Phid::new),
        is_disabled: false,
    }
}

/// Loader returning a handle named `<prefix><phid>` for every PHID except `skip`, plus
/// one for each PHID listed in `extra` whether it was asked for or not.
struct EchoLoader {
    prefix: String,
    skip: Option<Phid>,
    extra: Vec<Phid>,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ObjectHandleLoader for EchoLoader {
    async fn load_handles(&self, phids: &[Phid]) -> Result<HandleMap> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(phids
            .iter()
            .filter(|phid| Some(*phid) != self.skip.as_ref())
            .chain(&self.extra)
            .map(|phid| {
                let handle =
                    Handle::new(phid.clone(), format!("{}{}", self.prefix, phid)).completed();
                (phid.clone(), handle)
            })
            .collect())
    }
}

#[derive(Default)]
struct EchoFactory {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl LoaderFactory for EchoFactory {
    fn kind(&self) -> &'static str {
        "echo"
    }

    async fn create(&self, config: &Value) -> Result<Arc<dyn ObjectHandleLoader>> {
        Ok(Arc::new(EchoLoader {
            prefix: config
                .get("prefix")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            skip: config.get("skip").and_then(Value::as_str).map(Phid::new),
            extra: config
                .get("extra")
                .and_then(Value::as_array)
                .map(|phids| phids.iter().filter_map(Value::as_str).map(Phid::new).collect())
                .unwrap_or_default(),
            calls: self.calls.clone(),
        }))
    }
}

struct FailingLoader;

#[async_trait]
impl ObjectHandleLoader for FailingLoader {
    async fn load_handles(&self, _phids: &[Phid]) -> Result<HandleMap> {
        anyhow::bail!("remote application is down")
    }
}

struct FailingFactory;

#[async_trait]
impl LoaderFactory for FailingFactory {
    fn kind(&self) -> &'static str {
        "down"
    }

    async fn create(&self, _config: &Value) -> Result<Arc<dyn ObjectHandleLoader>> {
        Ok(Arc::new(FailingLoader))
    }
}

fn xyz() -> PhidType {
    "xyz!".parse().unwrap()
}

#[tokio::test]
async fn test_one_handle_per_distinct_phid() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();
    let requested = [
        "PHID-TASK-abc",
        "PHID-TASK-abc",
        "PHID-USER-alice",
        "PHID-PROJ-missing",
        "PHID-ZZZZ-1",
        "not-a-phid",
        UP_FOR_GRABS,
    ];

    let handles = resolver.resolve(requested, None).await.unwrap();

    assert_eq!(handles.len(), 6);
    for phid in requested {
        let handle = &handles[phid];
        assert_eq!(handle.phid.as_str(), phid);
        assert_eq!(handle.phid_type, Phid::new(phid).phid_type());
    }
}

#[tokio::test]
async fn test_task_handle() {
    let fixture = Fixture::new();
    let handle = fixture
        .resolver()
        .load_one_handle("PHID-TASK-abc", None)
        .await
        .unwrap();

    assert_eq!(handle.name, "Fix bug");
    assert_eq!(handle.full_name.as_deref(), Some("T42: Fix bug"));
    assert_eq!(handle.uri.as_deref(), Some("/T42"));
    assert_eq!(handle.alternate_id, Some(42));
    assert!(handle.complete);
    assert!(!handle.is_closed());

    let closed = fixture
        .resolver()
        .load_one_handle("PHID-TASK-def", None)
        .await
        .unwrap();
    assert_eq!(closed.status, Some(HandleStatus::Closed));
}

#[tokio::test]
async fn test_up_for_grabs_without_store_access() {
    let fixture = Fixture::new();
    let handles = fixture
        .resolver()
        .resolve([UP_FOR_GRABS, NO_PROJECT], None)
        .await
        .unwrap();

    let handle = &handles[UP_FOR_GRABS];
    assert_eq!(handle.name, "Up For Grabs");
    assert_eq!(handle.full_name.as_deref(), Some("upforgrabs (Up For Grabs)"));
    assert!(handle.complete);
    assert_eq!(handles[NO_PROJECT].name, "No Project");

    assert_eq!(fixture.tasks.query_count(), 0);
    assert_eq!(fixture.users.query_count(), 0);
}

#[tokio::test]
async fn test_deleted_object_gets_typed_placeholder() {
    let fixture = Fixture::new();
    fixture.tasks.remove(&Phid::new("PHID-TASK-abc")).await;

    let handle = fixture
        .resolver()
        .load_one_handle("PHID-TASK-abc", None)
        .await
        .unwrap();

    assert_eq!(handle.name, "Unknown Task");
    assert_eq!(handle.phid_type, PhidType::TASK);
    assert!(!handle.complete);
    assert!(handle.uri.is_none());
}

#[tokio::test]
async fn test_unknown_type_without_loader() {
    let fixture = Fixture::new();
    let handle = fixture
        .resolver()
        .load_one_handle("PHID-ABCD-1", None)
        .await
        .unwrap();

    assert_eq!(handle.name, "Unknown Object");
    assert_eq!(handle.full_name.as_deref(), Some("An Unknown Object"));
    assert!(!handle.complete);
}

#[tokio::test]
async fn test_one_bulk_load_per_type() {
    let fixture = Fixture::new();
    let phids: Vec<String> = (0..50).map(|i| format!("PHID-TASK-{i}")).collect();

    let handles = fixture.resolver().resolve(phids, None).await.unwrap();

    assert_eq!(handles.len(), 50);
    assert_eq!(fixture.tasks.query_count(), 1);
}

#[tokio::test]
async fn test_user_images() {
    let fixture = Fixture::new();
    let handles = fixture
        .resolver()
        .resolve(["PHID-USER-alice", "PHID-USER-bob"], None)
        .await
        .unwrap();

    assert_eq!(
        handles["PHID-USER-alice"].image_uri.as_deref(),
        Some("/file/data/alice.png")
    );
    assert_eq!(
        handles["PHID-USER-bob"].image_uri.as_deref(),
        Some(DEFAULT_PROFILE_IMAGE_URI)
    );
    assert_eq!(handles["PHID-USER-alice"].uri.as_deref(), Some("/p/alice/"));
    assert_eq!(fixture.files.query_count(), 1);
    assert_eq!(fixture.statuses.query_count(), 1);
}

#[tokio::test]
async fn test_external_loader_for_exact_type() {
    let fixture = Fixture::new();
    let factory = Arc::new(EchoFactory::default());
    let calls = factory.calls.clone();
    let resolver = fixture.resolver_with(|registry| {
        registry.register_factory(factory);
        registry.register_external(LoaderKey::Exact(xyz()), "echo", json!({ "prefix": "ext:" }));
    });

    let handles = resolver
        .resolve(["PHID-xyz!-1", "PHID-xyz!-2", "PHID-TASK-abc"], None)
        .await
        .unwrap();

    assert_eq!(handles["PHID-xyz!-1"].name, "ext:PHID-xyz!-1");
    assert!(handles["PHID-xyz!-2"].complete);
    assert_eq!(handles["PHID-TASK-abc"].name, "Fix bug");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_wildcard_loader_and_precedence() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver_with(|registry| {
        registry.register_factory(Arc::new(EchoFactory::default()));
        registry.register_external(LoaderKey::Exact(xyz()), "echo", json!({ "prefix": "exact:" }));
        registry.register_external(LoaderKey::Wildcard, "echo", json!({ "prefix": "any:" }));
    });

    let handles = resolver
        .resolve(["PHID-xyz!-1", "PHID-ABCD-1", "PHID-TASK-abc"], None)
        .await
        .unwrap();

    assert_eq!(handles["PHID-xyz!-1"].name, "exact:PHID-xyz!-1");
    assert_eq!(handles["PHID-ABCD-1"].name, "any:PHID-ABCD-1");
    // Built-in handlers win over the wildcard.
    assert_eq!(handles["PHID-TASK-abc"].name, "Fix bug");
}

#[tokio::test]
async fn test_external_gaps_become_unknown_objects() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver_with(|registry| {
        registry.register_factory(Arc::new(EchoFactory::default()));
        registry.register_external(
            LoaderKey::Exact(xyz()),
            "echo",
            json!({ "skip": "PHID-xyz!-2" }),
        );
    });

    let handles = resolver
        .resolve(["PHID-xyz!-1", "PHID-xyz!-2"], None)
        .await
        .unwrap();

    assert_eq!(handles.len(), 2);
    assert!(handles["PHID-xyz!-1"].complete);
    assert_eq!(handles["PHID-xyz!-2"].name, "Unknown Object");
    assert!(!handles["PHID-xyz!-2"].complete);
}

#[tokio::test]
async fn test_external_loader_cannot_answer_for_other_phids() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver_with(|registry| {
        registry.register_factory(Arc::new(EchoFactory::default()));
        registry.register_external(
            LoaderKey::Exact(xyz()),
            "echo",
            json!({ "prefix": "ext:", "extra": ["PHID-TASK-abc", "PHID-EXTR-1"] }),
        );
    });

    let handles = resolver
        .resolve(["PHID-xyz!-1", "PHID-TASK-abc"], None)
        .await
        .unwrap();

    assert_eq!(handles.len(), 2);
    assert_eq!(handles["PHID-xyz!-1"].name, "ext:PHID-xyz!-1");
    assert_eq!(handles["PHID-TASK-abc"].name, "Fix bug");
    assert!(!handles.contains_key("PHID-EXTR-1"));

    // Same when the loader's group is the only one in the batch.
    let handles = resolver.resolve(["PHID-xyz!-1"], None).await.unwrap();
    assert_eq!(handles.len(), 1);
}

#[tokio::test]
async fn test_misconfigured_external_loader_fails() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver_with(|registry| {
        registry.register_external(LoaderKey::Exact(xyz()), "unregistered", json!({}));
    });

    let err = resolver
        .resolve(["PHID-xyz!-1", "PHID-TASK-abc"], None)
        .await
        .unwrap_err();
    assert!(matches!(err, HandleError::UnknownLoader { .. }));

    // Types that never reach the bad entry still resolve.
    let handles = resolver.resolve(["PHID-TASK-abc"], None).await.unwrap();
    assert_eq!(handles.len(), 1);

    let resolver = fixture.resolver_with(|registry| {
        registry.register_factory(Arc::new(StaticLoaderFactory));
        registry.register_external(LoaderKey::Wildcard, "static", json!({ "handles": "nope" }));
    });
    let err = resolver.resolve(["PHID-ABCD-1"], None).await.unwrap_err();
    assert!(matches!(err, HandleError::InvalidLoader { .. }));
}

#[tokio::test]
async fn test_store_failure_is_isolated_to_its_group() {
    let fixture = Fixture::new();
    fixture.users.set_failing(true);

    let handles = fixture
        .resolver()
        .resolve(["PHID-USER-alice", "PHID-TASK-abc"], None)
        .await
        .unwrap();

    assert_eq!(handles["PHID-USER-alice"].name, "Unknown User");
    assert!(!handles["PHID-USER-alice"].complete);
    assert_eq!(handles["PHID-TASK-abc"].name, "Fix bug");
}

#[tokio::test]
async fn test_external_failure_is_isolated_to_its_group() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver_with(|registry| {
        registry.register_factory(Arc::new(FailingFactory));
        registry.register_external(LoaderKey::Exact(xyz()), "down", json!({}));
    });

    let handles = resolver
        .resolve(["PHID-xyz!-1", "PHID-TASK-abc"], None)
        .await
        .unwrap();

    assert_eq!(handles["PHID-xyz!-1"].name, "Unknown Object");
    assert!(handles["PHID-TASK-abc"].complete);
}

#[tokio::test]
async fn test_viewer_scoped_types() {
    let fixture = Fixture::new();
    fixture
        .projects
        .restrict("PHID-PROJ-secret", [Phid::new("PHID-USER-alice")])
        .await;
    let resolver = fixture.resolver();

    let bob = resolver
        .query(["PHID-PROJ-secret"])
        .with_viewer(Viewer::new("PHID-USER-bob"))
        .load_handles()
        .await
        .unwrap();
    assert_eq!(bob["PHID-PROJ-secret"].name, "Unknown Project");

    let alice = resolver
        .query(["PHID-PROJ-secret"])
        .with_viewer(Viewer::new("PHID-USER-alice"))
        .load_handles()
        .await
        .unwrap();
    assert_eq!(alice["PHID-PROJ-secret"].name, "Secret");
    assert_eq!(
        alice["PHID-PROJ-secret"].uri.as_deref(),
        Some("/project/view/5/")
    );
}

#[tokio::test]
async fn test_unscoped_types_ignore_viewer() {
    let fixture = Fixture::new();
    fixture
        .tasks
        .restrict("PHID-TASK-abc", [Phid::new("PHID-USER-alice")])
        .await;

    let handles = fixture
        .resolver()
        .resolve(["PHID-TASK-abc"], Some(&Viewer::new("PHID-USER-bob")))
        .await
        .unwrap();
    assert_eq!(handles["PHID-TASK-abc"].name, "Fix bug");
}

#[tokio::test]
async fn test_load_objects_exposes_records() {
    let fixture = Fixture::new();
    let objects = fixture
        .resolver()
        .query(["PHID-TASK-abc", "PHID-USER-bob", "PHID-TASK-nope", UP_FOR_GRABS])
        .load_objects()
        .await;

    assert_eq!(objects.len(), 2);
    let bob = objects["PHID-USER-bob"]
        .downcast_ref::<UserRecord>()
        .unwrap();
    assert_eq!(bob.username, "bob");
}

#[tokio::test]
async fn test_registry_from_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[resolver]
max_concurrent_groups = 3

[external_loaders]
"*" = "echo"

[external_loaders."xyz!"]
type = "echo"
prefix = "cfg:"
"#
    )
    .unwrap();

    let config = HandleConfig::new(file.path().to_str().unwrap()).unwrap();
    let fixture = Fixture::new();
    let registry = registry::from_config(
        &config,
        fixture.handlers(),
        vec![Arc::new(EchoFactory::default())],
    )
    .await
    .unwrap();
    let resolver = HandleResolver::with_config(Arc::new(registry), config.resolver);

    let handles: HashMap<_, _> = resolver
        .resolve(["PHID-xyz!-1", "PHID-QQQQ-1", "PHID-TASK-abc"], None)
        .await
        .unwrap();

    assert_eq!(handles["PHID-xyz!-1"].name, "cfg:PHID-xyz!-1");
    assert_eq!(handles["PHID-QQQQ-1"].name, "PHID-QQQQ-1");
    assert_eq!(handles["PHID-TASK-abc"].name, "Fix bug");
}

#[tokio::test]
async fn test_registry_from_config_rejects_unknown_kind() {
    let config = HandleConfig {
        external_loaders: HashMap::from([("xyz!".to_string(), json!("missing"))]),
        ..HandleConfig::default()
    };
    let result = registry::from_config(&config, Vec::new(), Vec::new()).await;
    assert!(matches!(result, Err(HandleError::UnknownLoader { .. })));
}

#[tokio::test]
async fn test_config_file_keeps_uppercase_type_tags() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[external_loaders.ABCD]
type = "static"
handles = {{ "PHID-ABCD-1" = {{ name = "abcd one", uri = "/abcd/1" }} }}
"#
    )
    .unwrap();

    let config = HandleConfig::new(file.path().to_str().unwrap()).unwrap();
    let registry = registry::from_config(
        &config,
        Fixture::new().handlers(),
        vec![Arc::new(StaticLoaderFactory)],
    )
    .await
    .unwrap();
    let resolver = HandleResolver::with_config(Arc::new(registry), config.resolver);

    let handle = resolver.load_one_handle("PHID-ABCD-1", None).await.unwrap();
    assert_eq!(handle.name, "abcd one");
    assert_eq!(handle.uri.as_deref(), Some("/abcd/1"));
    assert!(handle.complete);

    let gap = resolver.load_one_handle("PHID-ABCD-2", None).await.unwrap();
    assert_eq!(gap.name, "Unknown Object");
}

fn store<T: phid_handles::PhidObject + Clone>(object: T) -> Arc<MemoryStore<T>> {
    Arc::new(MemoryStore::with_objects([object]))
}

#[tokio::test]
async fn test_every_builtin_type_resolves() {
    let repository = RepositoryRecord {
        phid: Phid::new("PHID-REPO-1"),
        id: 1,
        callsign: "X".into(),
        name: "Example".into(),
        vcs: Vcs::Git,
    };
    let transaction = |phid: &str, id| TransactionRecord {
        phid: Phid::new(phid),
        id,
        object_phid: Phid::new("PHID-MOCK-1"),
        author_phid: Phid::new("PHID-USER-1"),
        date_created: 1_700_000_000,
    };

    let handlers = vec![
        builtin::users(
            store(UserRecord {
                phid: Phid::new("PHID-USER-1"),
                id: 1,
                username: "gone".into(),
                real_name: "Gone User".into(),
                profile_image_phid: None,
                is_disabled: true,
            }),
            Arc::new(MemoryStore::<FileRecord>::new()),
            Arc::new(MemoryStatusStore::new()),
        ),
        builtin::commits(
            store(CommitRecord {
                phid: Phid::new("PHID-CMIT-1"),
                repository_phid: repository.phid.clone(),
                commit_identifier: "abcdef0123456789".into(),
                epoch: 1_700_000_000,
            }),
            store(repository.clone()),
        ),
        builtin::tasks(store(task("PHID-TASK-1", 1, "Task", TaskStatus::Open))),
        builtin::config_entries(store(ConfigEntryRecord {
            phid: Phid::new("PHID-CONF-1"),
            key: "phabricator.base-uri".into(),
        })),
        builtin::files(store(FileRecord {
            phid: Phid::new("PHID-FILE-1"),
            id: 1,
            name: "notes.txt".into(),
            mime_type: "text/plain".into(),
            best_uri: "/file/data/notes.txt".into(),
        })),
        builtin::projects(store(ProjectRecord {
            phid: Phid::new("PHID-PROJ-1"),
            id: 1,
            name: "Project".into(),
        })),
        builtin::repositories(store(repository)),
        builtin::owners_packages(store(OwnersPackageRecord {
            phid: Phid::new("PHID-OPKG-1"),
            id: 1,
            name: "Package".into(),
        })),
        builtin::arcanist_projects(store(ArcanistProjectRecord {
            phid: Phid::new("PHID-APRJ-1"),
            id: 1,
            name: "arc".into(),
        })),
        builtin::mailing_lists(store(MailingListRecord {
            phid: Phid::new("PHID-MLST-1"),
            name: "dev@example.com".into(),
            uri: "mailto:dev@example.com".into(),
        })),
        builtin::revisions(store(RevisionRecord {
            phid: Phid::new("PHID-DREV-1"),
            id: 1,
            title: "Revision".into(),
            status: RevisionStatus::Accepted,
        })),
        builtin::wiki_documents(store(WikiDocumentRecord {
            phid: Phid::new("PHID-WIKI-1"),
            slug: "projects/example/".into(),
            title: "Example".into(),
            status: DocumentStatus::Exists,
        })),
        builtin::questions(store(QuestionRecord {
            phid: Phid::new("PHID-QUES-1"),
            id: 1,
            title: "Why?".into(),
        })),
        builtin::mocks(store(MockRecord {
            phid: Phid::new("PHID-MOCK-1"),
            id: 1,
            name: "Mock".into(),
        })),
        builtin::macros(store(MacroRecord {
            phid: Phid::new("PHID-MCRO-1"),
            id: 1,
            name: "Macro".into(),
        })),
        builtin::pastes(store(PasteRecord {
            phid: Phid::new("PHID-PSTE-1"),
            id: 1,
            title: "Paste".into(),
        })),
        builtin::blogs(store(BlogRecord {
            phid: Phid::new("PHID-BLOG-1"),
            id: 1,
            name: "Blog".into(),
        })),
        builtin::posts(store(PostRecord {
            phid: Phid::new("PHID-POST-1"),
            id: 1,
            title: "Post".into(),
        })),
        builtin::transactions(
            store(transaction("PHID-XACT-MOCK-1", 11)),
            store(transaction("PHID-XACT-MCRO-1", 12)),
        ),
    ];
    let registry = HandlerRegistry::with_handlers(handlers).unwrap();
    let resolver = HandleResolver::new(Arc::new(registry));

    let types = [
        ("USER", "User"),
        ("CMIT", "Commit"),
        ("TASK", "Task"),
        ("CONF", "Config Entry"),
        ("FILE", "File"),
        ("PROJ", "Project"),
        ("REPO", "Repository"),
        ("OPKG", "Package"),
        ("APRJ", "Arcanist Project"),
        ("MLST", "Mailing List"),
        ("DREV", "Revision"),
        ("WIKI", "Document"),
        ("QUES", "Ponder Question"),
        ("MOCK", "Mock"),
        ("MCRO", "Macro"),
        ("PSTE", "Paste"),
        ("BLOG", "Blog"),
        ("POST", "Post"),
        ("XACT-MOCK", "Transaction"),
        ("XACT-MCRO", "Transaction"),
    ];
    let phids: Vec<String> = types
        .iter()
        .flat_map(|(tag, _)| [format!("PHID-{tag}-1"), format!("PHID-{tag}-missing")])
        .collect();

    let handles = resolver
        .resolve(phids.iter().map(String::as_str), None)
        .await
        .unwrap();

    assert_eq!(handles.len(), types.len() * 2);
    for (tag, noun) in types {
        let found = &handles[format!("PHID-{tag}-1").as_str()];
        assert!(found.complete, "{tag} should resolve");
        assert_ne!(found.name, format!("Unknown {noun}"));

        let missing = &handles[format!("PHID-{tag}-missing").as_str()];
        assert_eq!(missing.name, format!("Unknown {noun}"));
        assert!(!missing.complete);
    }

    let user = &handles["PHID-USER-1"];
    assert!(user.disabled);
    assert_eq!(user.image_uri.as_deref(), Some(DEFAULT_PROFILE_IMAGE_URI));
    assert_eq!(handles["PHID-CMIT-1"].name, "rXabcdef012345");
    assert_eq!(handles["PHID-CMIT-1"].uri.as_deref(), Some("/rXabcdef0123456789"));
    assert_eq!(handles["PHID-XACT-MOCK-1"].name, "Transaction 11");
    assert_eq!(handles["PHID-WIKI-1"].uri.as_deref(), Some("/w/projects/example/"));
    assert_eq!(handles["PHID-DREV-1"].full_name.as_deref(), Some("D1: Revision"));
    assert!(!handles["PHID-DREV-1"].is_closed());
}
