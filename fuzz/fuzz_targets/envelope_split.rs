use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(env) = viewtree::split(data) {
                assert_eq!(env.signature.len(), viewtree::SIGNATURE_LEN);
                let _ = viewtree::signature_hex(env.signature);
            }
        });
    }
}
