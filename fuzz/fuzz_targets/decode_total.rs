use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let result = viewtree::build(data);
            assert_eq!(result.valid, result.diagnostic.is_none());
        });
    }
}
