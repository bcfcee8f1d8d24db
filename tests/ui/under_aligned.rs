inlay::assert_layout!(u64, size = 8, align = 2);

fn main() {}
