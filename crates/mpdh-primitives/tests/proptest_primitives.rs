use proptest::prelude::*;

use mpdh_primitives::ec::{DhCurve, NistP256, Point, Scalar, Secp256k1};

fn distributes_over_addition<C: DhCurve>(a: &[u8; 32], b: &[u8; 32], e: &[u8; 32]) -> bool {
    let a = Scalar::<C>::from_be_bytes(a).unwrap();
    let b = Scalar::<C>::from_be_bytes(b).unwrap();
    let e = Scalar::<C>::from_be_bytes(e).unwrap();
    let point = match Point::<C>::mul_base(&e) {
        Ok(p) => p,
        // e reduced to zero
        Err(_) => return true,
    };
    let split = point.scale(&a) + point.scale(&b);
    let direct = point.scale(&(&a + &b));
    split == direct
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn homomorphic_scalar_multiplication_p256(
        a in prop::array::uniform32(any::<u8>()),
        b in prop::array::uniform32(any::<u8>()),
        e in prop::array::uniform32(any::<u8>()),
    ) {
        prop_assert!(distributes_over_addition::<NistP256>(&a, &b, &e));
    }

    #[test]
    fn homomorphic_scalar_multiplication_secp256k1(
        a in prop::array::uniform32(any::<u8>()),
        b in prop::array::uniform32(any::<u8>()),
        e in prop::array::uniform32(any::<u8>()),
    ) {
        prop_assert!(distributes_over_addition::<Secp256k1>(&a, &b, &e));
    }

    #[test]
    fn scalar_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..=32)) {
        let s = Scalar::<NistP256>::from_be_bytes(&bytes).unwrap();
        let hex_str = s.to_hex();
        prop_assert!(!hex_str.starts_with("00"));
        prop_assert_eq!(hex_str.clone(), hex_str.to_lowercase());
        let s2 = Scalar::<NistP256>::from_hex(&hex_str).unwrap();
        prop_assert_eq!(s, s2);
    }

    #[test]
    fn point_pem_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        let k = Scalar::<Secp256k1>::from_be_bytes(&seed).unwrap();
        if let Ok(p) = Point::<Secp256k1>::mul_base(&k) {
            let pem = p.to_pem().unwrap();
            let p2 = Point::<Secp256k1>::from_pem(&pem).unwrap();
            prop_assert_eq!(p.x_bytes(), p2.x_bytes());
            prop_assert_eq!(p, p2);
        }
    }
}
