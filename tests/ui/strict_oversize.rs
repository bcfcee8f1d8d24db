inlay::assert_layout!(u32, size = 8, align = 4, strict);

fn main() {}
