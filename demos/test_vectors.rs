use midori_cofb::encrypt;
use serde::Serialize;

struct Case {
    k0: u64,
    k1: u64,
    n: u64,
    plaintext: &'static [u64],
}

const CASES: [Case; 3] = [
    Case {
        k0: 0x0123_4567_89AB_CDEF,
        k1: 0xFEDC_BA98_7654_3210,
        n: 0x0123_4567_89AB_CDEF,
        plaintext: &[0xAAAA_BBBB_CCCC_DDDD],
    },
    Case {
        k0: 0x0123_4567_89AB_CDEF,
        k1: 0xFEDC_BA98_7654_3210,
        n: 0,
        plaintext: &[0],
    },
    Case {
        k0: 0,
        k1: 0,
        n: 0,
        plaintext: &[0],
    },
];

const TEST_VECTOR_OUTPUT_FILE: &str = "test_vectors/basic_test_vector.json";

#[derive(Serialize)]
struct TestVector {
    k0: String,
    k1: String,
    n: String,
    plaintext: Vec<String>,
    ciphertext: Vec<String>,
    tag: String,
}

fn main() {
    println!("Generating test vectors...");
    let vectors = CASES
        .iter()
        .map(|case| {
            let (ciphertext, tag) = encrypt(case.k0, case.k1, case.n, case.plaintext);
            TestVector {
                k0: hex::encode(case.k0.to_be_bytes()),
                k1: hex::encode(case.k1.to_be_bytes()),
                n: hex::encode(case.n.to_be_bytes()),
                plaintext: case
                    .plaintext
                    .iter()
                    .map(|b| hex::encode(b.to_be_bytes()))
                    .collect(),
                ciphertext: ciphertext
                    .iter()
                    .map(|b| hex::encode(b.to_be_bytes()))
                    .collect(),
                tag: hex::encode(tag.to_be_bytes()),
            }
        })
        .collect::<Vec<_>>();

    let json = serde_json::to_string_pretty(&vectors).unwrap();
    println!("{}", json);
    std::fs::create_dir_all("test_vectors").unwrap();
    std::fs::write(TEST_VECTOR_OUTPUT_FILE, json).unwrap();
    println!("Test vectors written to {}", TEST_VECTOR_OUTPUT_FILE);
}
