use midori_cofb::{decrypt, encrypt};

fn main() {
    let k0 = 0x0123_4567_89AB_CDEF_u64;
    let k1 = 0xFEDC_BA98_7654_3210_u64;
    let n = 0x1122_3344_5566_7788_u64;

    let plaintext = [0x4865_6C6C_6F2C_2077u64, 0x6F72_6C64_2121_2121];
    println!("K0: {:016x}", k0);
    println!("K1: {:016x}", k1);
    println!("N:  {:016x}", n);
    for (i, b) in plaintext.iter().enumerate() {
        println!("B{}: {:016x}", i + 1, b);
    }

    let (ciphertext, tag) = encrypt(k0, k1, n, &plaintext);
    for (i, c) in ciphertext.iter().enumerate() {
        println!("C{}: {:016x}", i + 1, c);
    }
    println!("T:  {:016x}", tag);

    let (recovered, computed_tag, verified) = decrypt(k0, k1, n, &ciphertext, tag);
    for (i, m) in recovered.iter().enumerate() {
        println!("M{}: {:016x}", i + 1, m);
    }
    println!("T_: {:016x}", computed_tag);
    println!("verified: {}", verified);
    assert_eq!(recovered, plaintext);
    assert!(verified);
}
