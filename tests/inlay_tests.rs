use inlay::{Inlay, LayoutPolicy, LayoutSpec, StrictInlay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Pair {
    first: usize,
    second: usize,
}

impl Pair {
    fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

const PAIR_SIZE: usize = core::mem::size_of::<Pair>();
const PAIR_ALIGN: usize = core::mem::align_of::<Pair>();

type StrictPair = StrictInlay<Pair, PAIR_SIZE, PAIR_ALIGN>;

#[test]
fn test_two_word_value_end_to_end() {
    let held = StrictPair::new(Pair::new(17, 42));
    assert_eq!(held.first, 17);
    assert_eq!(held.second, 42);

    let span = held.storage_span();
    assert!(held.contains_addr(held.as_ptr() as usize));
    assert!(held.contains_addr(span.end - 1));
    assert!(!held.contains_addr(span.end));
    assert_eq!(span.end - span.start, PAIR_SIZE);

    drop(held);
}

#[test]
fn test_construct_matches_direct_construction() {
    let held: Inlay<Vec<u32>, 64, 16> = Inlay::new_with(|| vec![7; 5]);
    assert_eq!(*held, vec![7; 5]);

    let held: Inlay<String, 32, 8> = Inlay::new_with(|| String::from("abc"));
    assert_eq!(held.as_str(), "abc");
}

#[test]
fn test_copy_is_independent() {
    let original: Inlay<Vec<i32>, 32, 8> = Inlay::new(vec![1, 2, 3]);
    let mut copy = original.clone();
    assert_eq!(copy, original);

    copy.push(4);
    assert_eq!(*original, vec![1, 2, 3]);
    assert_eq!(*copy, vec![1, 2, 3, 4]);
}

#[test]
fn test_copy_assign_keeps_storage() {
    let source: Inlay<String, 32, 8> = Inlay::new(String::from("source"));
    let mut target: Inlay<String, 32, 8> = Inlay::new(String::from("target"));
    let before = target.storage_span();

    target.clone_from(&source);
    assert_eq!(*target, "source");
    assert_eq!(target.storage_span(), before);
}

#[test]
fn test_move_preserves_value() {
    let held: Inlay<Vec<u8>, 32, 8> = Inlay::new(vec![9, 8, 7]);
    let moved = held;
    assert_eq!(*moved, vec![9, 8, 7]);
}

#[test]
fn test_move_construct_leaves_source_destructible() {
    let mut source: Inlay<String, 32, 8> = Inlay::new(String::from("payload"));
    let target = Inlay::take_from(&mut source);
    assert_eq!(*target, "payload");
    assert_eq!(*source, "");
    drop(source);
    assert_eq!(*target, "payload");
}

#[test]
fn test_move_assign() {
    let mut target: Inlay<String, 32, 8> = Inlay::new(String::from("old"));
    target.assign(Inlay::new(String::from("new")));
    assert_eq!(*target, "new");

    let mut other: Inlay<String, 32, 8> = Inlay::new(String::from("newer"));
    target.move_assign_from(&mut other);
    assert_eq!(*target, "newer");
    assert!(other.is_empty());
}

#[test]
fn test_loose_declaration_accepts_oversized_storage() {
    // The strict variant of this declaration does not build; the loose one does.
    let held: Inlay<Pair, { PAIR_SIZE * 2 }, { PAIR_ALIGN * 2 }> = Inlay::new(Pair::new(1, 2));
    assert_eq!(*held, Pair::new(1, 2));
    assert_eq!(core::mem::size_of_val(&held), PAIR_SIZE * 2);

    let report = Inlay::<Pair, { PAIR_SIZE * 2 }, { PAIR_ALIGN * 2 }>::layout();
    assert!(report.check().is_ok());

    let strict = inlay::LayoutReport::new(report.declared, report.actual, LayoutPolicy::Strict);
    assert!(strict.check().is_err());
}

#[test]
fn test_layout_report_for_strict_holder() {
    let report = StrictPair::layout();
    assert_eq!(report.declared, LayoutSpec::new(PAIR_SIZE, PAIR_ALIGN));
    assert_eq!(report.actual, LayoutSpec::of::<Pair>());
    assert_eq!(report.policy, LayoutPolicy::Strict);
    assert!(report.is_valid());
}

#[test]
fn test_into_inner_and_replace() {
    let mut held: Inlay<Pair, 32, 16> = Pair::new(1, 1).into();
    let previous = held.replace(Pair::new(2, 2));
    assert_eq!(previous, Pair::new(1, 1));
    assert_eq!(held.into_inner(), Pair::new(2, 2));
}

#[test]
fn test_try_new_with_forwards_error() {
    let ok: Result<Inlay<u8, 1, 1>, _> = Inlay::try_new_with(|| "200".parse::<u8>());
    assert_eq!(*ok.unwrap(), 200);

    let err: Result<Inlay<u8, 1, 1>, _> = Inlay::try_new_with(|| "300".parse::<u8>());
    assert_eq!(err.unwrap_err(), "300".parse::<u8>().unwrap_err());
}
