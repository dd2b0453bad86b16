use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::PathBuf;

use replica::Reflect;
use replica_testhelpers::test;

#[derive(Debug, Default, PartialEq, Reflect)]
struct Abc {
    a: u32,
    b: String,
    c: Vec<u8>,
}

#[derive(Debug, Default, PartialEq, Reflect)]
struct Acd {
    a: u64,
    c: Vec<u8>,
    d: bool,
}

#[test]
fn fields_are_matched_by_name() {
    let src = Abc {
        a: 1,
        b: "b".into(),
        c: vec![3],
    };
    let mut dst = Acd {
        d: true,
        ..Acd::default()
    };
    replica::copy_into(&mut dst, &src);
    assert_eq!(
        dst,
        Acd {
            a: 1,
            c: vec![3],
            d: true,
        }
    );
}

#[test]
fn leaves_that_do_not_convert_are_skipped() {
    #[derive(Default, Reflect)]
    struct Wide {
        a: u32,
        b: String,
        c: f64,
    }

    #[derive(Default, Reflect)]
    struct Narrow {
        a: u8,
        b: i32,
        c: f32,
    }

    let src = Wide {
        a: 300,
        b: "9".into(),
        c: 0.1,
    };
    let mut dst = Narrow { a: 7, b: 9, c: 1.5 };
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst.a, 7);
    assert_eq!(dst.b, 9);
    assert_eq!(dst.c, 1.5);
}

#[test]
fn lossless_conversions_are_applied() {
    #[derive(Default, Reflect)]
    struct Small {
        count: u16,
        delta: i8,
        ratio: f32,
        initial: char,
        path: String,
    }

    #[derive(Default, Reflect)]
    struct Large {
        count: u64,
        delta: i64,
        ratio: f64,
        initial: String,
        path: PathBuf,
    }

    let src = Small {
        count: 65_000,
        delta: -3,
        ratio: 0.25,
        initial: 'r',
        path: "/var/log".into(),
    };
    let mut dst = Large::default();
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst.count, 65_000);
    assert_eq!(dst.delta, -3);
    assert_eq!(dst.ratio, 0.25);
    assert_eq!(dst.initial, "r");
    assert_eq!(dst.path, PathBuf::from("/var/log"));
}

#[test]
fn mismatched_categories_are_skipped() {
    #[derive(Default, Reflect)]
    struct Listy {
        a: Vec<u32>,
        b: Option<Box<u32>>,
        c: HashMap<u32, u32>,
    }

    #[derive(Default, Reflect)]
    struct Flat {
        a: u32,
        b: u32,
        c: Vec<u32>,
    }

    let src = Listy {
        a: vec![1],
        b: Some(Box::new(2)),
        c: HashMap::from([(3, 3)]),
    };
    let mut dst = Flat {
        a: 10,
        b: 20,
        c: vec![30],
    };
    replica::copy_into(&mut dst, &src);
    assert_eq!((dst.a, dst.b, dst.c), (10, 20, vec![30]));
}

#[test]
fn nested_structs_are_reset_but_the_root_is_not() {
    #[derive(Debug, Default, PartialEq, Reflect)]
    struct Settings {
        retries: u32,
        label: String,
    }

    #[derive(Debug, Default, PartialEq, Reflect)]
    struct Job {
        settings: Settings,
        tags: Vec<String>,
    }

    #[derive(Default, Reflect)]
    struct SettingsPatch {
        retries: u32,
    }

    #[derive(Default, Reflect)]
    struct JobPatch {
        settings: SettingsPatch,
    }

    let mut dst = Job {
        settings: Settings {
            retries: 1,
            label: "stale".into(),
        },
        tags: vec!["kept".into()],
    };
    let src = JobPatch {
        settings: SettingsPatch { retries: 5 },
    };
    replica::copy_into(&mut dst, &src);
    assert_eq!(
        dst,
        Job {
            settings: Settings {
                retries: 5,
                label: String::new(),
            },
            tags: vec!["kept".into()],
        }
    );
}

#[test]
fn destination_pointers_get_a_fresh_pointee() {
    let src = Some(Box::new(Abc {
        a: 4,
        ..Abc::default()
    }));
    let mut dst = Some(Box::new(Acd {
        d: true,
        ..Acd::default()
    }));
    replica::copy_into(&mut dst, &src);
    assert_eq!(
        dst,
        Some(Box::new(Acd {
            a: 4,
            ..Acd::default()
        }))
    );
}

#[test]
fn pointer_types_can_differ() {
    let src = Some(Box::new(5u8));
    let mut dst: Option<Box<u32>> = None;
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst, Some(Box::new(5)));

    // pointer depth has to match
    let mut shallow: Option<u32> = None;
    replica::copy_into(&mut shallow, &src);
    assert_eq!(shallow, Some(0));
}

#[test]
fn map_keys_and_values_convert() {
    let src = HashMap::from([(1u8, 'a'), (2, 'b')]);
    let mut dst = BTreeMap::from([(9u32, String::from("stale"))]);
    replica::copy_into(&mut dst, &src);
    assert_eq!(
        dst,
        BTreeMap::from([(1, String::from("a")), (2, String::from("b"))])
    );
}

#[test]
fn entries_with_unconvertible_keys_are_dropped() {
    let src = HashMap::from([(String::from("one"), 1u8)]);
    let mut dst = HashMap::from([(7u32, 7u8)]);
    replica::copy_into(&mut dst, &src);
    assert!(dst.is_empty());
}

#[test]
fn map_values_that_do_not_convert_are_zero() {
    let src = BTreeMap::from([(1u8, 300u32)]);
    let mut dst: BTreeMap<u8, u8> = BTreeMap::new();
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst, BTreeMap::from([(1, 0)]));
}

#[test]
fn lists_of_different_types() {
    let src = [1u16, 2, 3];
    let mut dst = vec![9u32; 10];
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst, [1, 2, 3]);

    // fixed-size destinations take the common prefix
    let src = vec![1u8, 2, 3, 4, 5, 6];
    let mut dst = [0u8; 4];
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst, [1, 2, 3, 4]);

    let src = vec![7u8];
    let mut dst = [9u8; 3];
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst, [7, 0, 0]);
}

#[test]
fn zero_sized_source_items_do_not_size_the_destination() {
    #[derive(Default, Reflect)]
    struct Marker;

    #[derive(Debug, Default, PartialEq, Reflect)]
    struct Slot {
        id: u32,
    }

    #[derive(Default, Reflect)]
    struct Markers {
        items: Vec<Marker>,
    }

    #[derive(Default, Reflect)]
    struct Slots {
        items: Vec<Slot>,
    }

    let mut dst = Slots::default();
    replica::copy_into(
        &mut dst,
        &Markers {
            items: vec![Marker, Marker],
        },
    );
    assert_eq!(dst.items, [Slot::default(), Slot::default()]);

    let mut bytes = vec![1u8];
    replica::copy_into(&mut bytes, &Vec::<()>::new());
    assert!(bytes.is_empty());

    let mut queue = VecDeque::from([1u64]);
    replica::copy_into(&mut queue, &vec![(); 3]);
    assert_eq!(queue, [0, 0, 0]);
}

#[test]
fn capacity_carries_over_only_between_same_items() {
    let mut src: Vec<u8> = Vec::with_capacity(64);
    src.push(1);

    let copy = replica::copy_of(&src);
    assert!(copy.capacity() >= 64);

    let mut wide: Vec<u64> = Vec::new();
    replica::copy_into(&mut wide, &src);
    assert_eq!(wide, [1]);
    assert!(wide.capacity() < 64);
}

#[test]
fn renamed_and_skipped_fields() {
    #[derive(Default, Reflect)]
    struct Renamed {
        #[replica(rename = "b")]
        bee: String,
        #[replica(skip)]
        a: u32,
        #[replica(rename = "c")]
        bytes: Vec<u8>,
    }

    let src = Abc {
        a: 1,
        b: "x".into(),
        c: vec![1, 2],
    };
    let mut dst = Renamed {
        a: 5,
        ..Renamed::default()
    };
    replica::copy_into(&mut dst, &src);
    assert_eq!(dst.bee, "x");
    assert_eq!(dst.a, 5);
    assert_eq!(dst.bytes, [1, 2]);

    // and back again
    let mut back = Abc::default();
    replica::copy_into(&mut back, &dst);
    assert_eq!(
        back,
        Abc {
            a: 0,
            b: "x".into(),
            c: vec![1, 2],
        }
    );
}

#[test]
fn tuple_structs_match_by_position() {
    #[derive(Default, Reflect)]
    struct Pair(u8, String);

    #[derive(Default, Reflect)]
    struct Triple(u16, String, bool);

    let mut dst = Triple(0, String::new(), true);
    replica::copy_into(&mut dst, &Pair(3, "three".into()));
    assert_eq!(dst.0, 3);
    assert_eq!(dst.1, "three");
    assert!(dst.2);
}

#[test]
fn enums_only_assign_from_themselves() {
    #[derive(Debug, Clone, Default, PartialEq, Reflect)]
    enum Mode {
        #[default]
        Fast,
        Safe,
    }

    #[derive(Debug, Clone, Default, PartialEq, Reflect)]
    enum OtherMode {
        #[default]
        Fast,
        Safe,
    }

    let mut mode = Mode::Fast;
    replica::copy_into(&mut mode, &Mode::Safe);
    assert_eq!(mode, Mode::Safe);

    replica::copy_into(&mut mode, &OtherMode::Fast);
    assert_eq!(mode, Mode::Safe);
}
