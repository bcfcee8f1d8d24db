inlay::assert_layout!([u8; 12], size = 8, align = 4);

fn main() {}
