use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;

use replica::{Copier, CopyError, Reflect};
use replica_testhelpers::test;

#[derive(Debug, Clone, Default, PartialEq, Reflect)]
enum Priority {
    #[default]
    Low,
    High,
}

#[derive(Debug, Default, PartialEq, Reflect)]
struct Settings {
    retries: u32,
    label: String,
    priority: Priority,
}

#[derive(Debug, Default, PartialEq, Reflect)]
struct Job {
    id: u64,
    settings: Settings,
    fallback: Option<Box<Settings>>,
    tags: Vec<String>,
    queue: VecDeque<u16>,
    weights: [f32; 3],
    env: HashMap<String, Vec<u8>>,
    limits: BTreeMap<u8, u64>,
}

fn sample_job() -> Job {
    Job {
        id: 42,
        settings: Settings {
            retries: 3,
            label: "nightly".into(),
            priority: Priority::High,
        },
        fallback: Some(Box::new(Settings {
            retries: 1,
            label: "fallback".into(),
            priority: Priority::Low,
        })),
        tags: vec!["a".into(), "b".into()],
        queue: VecDeque::from([4, 5, 6]),
        weights: [0.5, 1.0, 2.0],
        env: HashMap::from([("PATH".into(), b"/bin".to_vec())]),
        limits: BTreeMap::from([(1, 10), (2, 20)]),
    }
}

#[derive(Debug, Default, PartialEq, Reflect)]
struct Node {
    value: u32,
    next: Option<Box<Node>>,
}

#[test]
fn copy_of_is_equal_to_its_source() {
    let job = sample_job();
    let copy = replica::copy_of(&job);
    assert_eq!(*copy, job);
}

#[test]
fn copy_of_shares_no_storage() {
    let job = sample_job();
    let mut copy = replica::copy_of(&job);

    assert!(!core::ptr::eq(
        &**copy.fallback.as_ref().unwrap(),
        &**job.fallback.as_ref().unwrap(),
    ));
    assert_ne!(copy.tags.as_ptr(), job.tags.as_ptr());

    copy.tags[0].push('!');
    copy.fallback.as_mut().unwrap().retries = 99;
    copy.env.get_mut("PATH").unwrap().push(b'/');
    copy.limits.insert(3, 30);

    assert_eq!(job, sample_job());
}

#[test]
fn copy_into_overwrites_every_field() {
    let job = sample_job();
    let mut dst = Job {
        tags: vec!["stale".into(); 5],
        limits: BTreeMap::from([(9, 9)]),
        ..Job::default()
    };
    replica::copy_into(&mut dst, &job);
    assert_eq!(dst, job);
}

#[test]
fn recursive_types_are_copied() {
    let list = Node {
        value: 1,
        next: Some(Box::new(Node {
            value: 2,
            next: Some(Box::new(Node {
                value: 3,
                next: None,
            })),
        })),
    };
    let copy = replica::copy_of(&list);
    assert_eq!(*copy, list);
}

#[test]
fn null_source_pointer_leaves_destination_alone() {
    let src = Node {
        value: 1,
        next: None,
    };
    let mut dst = Node {
        value: 7,
        next: Some(Box::new(Node::default())),
    };
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst.value, 1);
    assert_eq!(dst.next, Some(Box::new(Node::default())));

    // a fresh destination stays null
    let copy = replica::copy_of(&src);
    assert_eq!(copy.next, None);
}

#[test]
fn null_source_pointer_in_a_nested_struct_ends_up_null() {
    #[derive(Debug, Default, PartialEq, Reflect)]
    struct Wrapper {
        label: String,
        node: Node,
    }

    let src = Wrapper {
        label: "head".into(),
        node: Node {
            value: 1,
            next: None,
        },
    };
    let mut dst = Wrapper {
        label: String::new(),
        node: Node {
            value: 7,
            next: Some(Box::new(Node {
                value: 8,
                next: None,
            })),
        },
    };
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst, src);
    assert_eq!(dst.node.next, None);
}

#[test]
fn shared_pointers_to_plain_data_are_duplicated() {
    let src = Rc::new(vec![1u8, 2, 3]);
    let copy = replica::copy_of(&src);
    assert_eq!(**copy, *src);
    assert!(!Rc::ptr_eq(&*copy, &src));
}

#[test]
fn erased_copy_of_allocates_a_new_pointer() {
    let src: Box<Job> = Box::new(sample_job());
    let copy = Copier::new().copy_of_dyn(&src);
    let copy: &dyn Reflect = &*copy;
    let copy = copy.peek().get::<Box<Job>>().unwrap();
    assert_eq!(**copy, *src);
    assert!(!core::ptr::eq(&**copy, &*src));
}

#[test]
fn erased_copy_of_null_pointer_is_zero() {
    let copy = Copier::new().copy_of_dyn(&None::<u32>);
    let copy: &dyn Reflect = &*copy;
    assert_eq!(copy.peek().get::<Option<u32>>(), Some(&Some(0)));
}

#[test]
fn erased_copy_into() {
    let src = Settings {
        retries: 2,
        label: "x".into(),
        priority: Priority::High,
    };
    let mut dst = Settings::default();
    Copier::new().copy_into_dyn(Some(&mut dst), &src);
    assert_eq!(dst, src);
}

#[test]
#[should_panic(expected = "copy destination cannot be None")]
fn erased_copy_into_nothing_panics() {
    Copier::new().copy_into_dyn(None, &sample_job());
}

#[test]
#[should_panic(expected = "copy_of needs a pointer source, but got Job")]
fn erased_copy_of_a_value_panics() {
    Copier::new().copy_of_dyn(&sample_job());
}

#[test]
fn fallible_entry_points_report_misuse() {
    let job = sample_job();
    assert!(matches!(
        Copier::new().try_copy_into(None, &job),
        Err(CopyError::NullDestination)
    ));

    let Err(err) = Copier::new().try_copy_of(&job) else {
        panic!("copying a struct by value should fail");
    };
    let CopyError::NotAPointer { shape } = err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(shape.type_identifier, "Job");
}
