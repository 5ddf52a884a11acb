// Astype tests — conversion through aliases and native dtypes on the CPU backend

#[cfg(test)]
mod tests {
    use astype::prelude::*;
    use astype_core::complex::{Complex128, Complex64};
    use rstest::rstest;

    type T = CpuTensor;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn source() -> T {
        T::from_f64_slice(&[1.1], 1, DType::F32, &CpuDevice).unwrap()
    }

    fn isclose(a: &T, b: &T) -> bool {
        a.allclose(b, 1e-5, 1e-8).unwrap()
    }

    #[rstest]
    #[case("torch.bool", 1.0, DType::Bool)]
    #[case("torch.uint8", 1.0, DType::U8)]
    #[case("torch.int8", 1.0, DType::I8)]
    #[case("torch.int16", 1.0, DType::I16)]
    #[case("torch.short", 1.0, DType::I16)]
    #[case("torch.int32", 1.0, DType::I32)]
    #[case("torch.int", 1.0, DType::I32)]
    #[case("torch.int64", 1.0, DType::I64)]
    #[case("torch.long", 1.0, DType::I64)]
    #[case("int", 1.0, DType::I64)]
    #[case("torch.float16", 1.1, DType::F16)]
    #[case("binary16", 1.1, DType::F16)]
    #[case("torch.half", 1.1, DType::F16)]
    #[case("torch.float32", 1.1, DType::F32)]
    #[case("torch.float", 1.1, DType::F32)]
    #[case("torch.float64", 1.1, DType::F64)]
    #[case("torch.double", 1.1, DType::F64)]
    #[case("float", 1.1, DType::F64)]
    #[case("torch.bfloat16", 1.101, DType::BF16)]
    #[case("torch.complex64", 1.1, DType::C64)]
    #[case("torch.cfloat", 1.1, DType::C64)]
    #[case("torch.complex128", 1.1, DType::C128)]
    #[case("torch.cdouble", 1.1, DType::C128)]
    #[case("complex", 1.1, DType::C128)]
    fn test_conversion(#[case] alias: &str, #[case] value: f64, #[case] dtype: DType) {
        init();
        let target = T::from_f64_slice(&[value], 1, dtype, &CpuDevice).unwrap();
        let tensor = source().astype(alias).unwrap();
        assert!(isclose(&tensor, &target), "{alias}: {tensor:?}");
        assert_eq!(tensor.dtype(), target.dtype());
    }

    #[test]
    fn test_bool_holds_true() {
        let b = astype(&source(), "torch.bool").unwrap();
        assert_eq!(b.dtype(), DType::Bool);
        assert_eq!(b.to_vec::<bool>().unwrap(), vec![true]);
    }

    #[test]
    fn test_int32_truncates() {
        let i = astype(&source(), "torch.int32").unwrap();
        assert_eq!(i.dtype(), DType::I32);
        assert_eq!(i.to_vec::<i32>().unwrap(), vec![1]);
    }

    #[test]
    fn test_complex_parts() {
        let z = astype(&source(), "torch.cfloat").unwrap();
        assert_eq!(z.to_vec::<Complex64>().unwrap(), vec![Complex64::new(1.1, 0.0)]);
        let z = astype(&source(), "complex").unwrap();
        let v = z.to_vec::<Complex128>().unwrap();
        assert_eq!(v[0].re, 1.1f32 as f64);
        assert_eq!(v[0].im, 0.0);
    }

    #[test]
    fn test_native_dtype_passes_through() {
        // A registry without torch.bool still converts to DType::Bool when
        // the dtype is given directly.
        let old = DtypeRegistry::new("1.0.0");
        let b = source().astype_with(&old, DType::Bool).unwrap();
        assert_eq!(b.to_vec::<bool>().unwrap(), vec![true]);
        let h = astype(&source(), DType::F16).unwrap();
        assert_eq!(h.dtype(), DType::F16);
    }

    #[test]
    fn test_dtype_id_passes_through() {
        let id = resolve("torch.long").unwrap();
        let i = source().astype(id).unwrap();
        assert_eq!(i.dtype(), DType::I64);
    }

    #[test]
    fn test_owned_string_alias() {
        let alias = String::from("torch.uint8");
        let u = source().astype(&alias).unwrap();
        assert_eq!(u.to_vec::<u8>().unwrap(), vec![1]);
    }

    #[test]
    fn test_unknown_alias_propagates() {
        init();
        let err = astype(&source(), "np.int").unwrap_err();
        assert!(matches!(err, Error::Parse(ref e) if e.alias() == Some("np.int")));
        assert_eq!(err.to_string(), "Unrecognized dtype: np.int");
    }

    #[test]
    fn test_gated_alias_fails_on_old_host() {
        let old = DtypeRegistry::new("1.2.0");
        for alias in ["torch.bool", "torch.bfloat16"] {
            let err = source().astype_with(&old, alias).unwrap_err();
            assert!(matches!(err, Error::Parse(_)), "{alias}");
        }
        assert!(source().astype_with(&old, "torch.int16").is_ok());
    }

    #[test]
    fn test_invalid_spec() {
        let err = astype_dynamic(&source(), &1.5f64).unwrap_err();
        assert!(matches!(err, Error::InvalidSpec { .. }));
        assert!(err.to_string().contains("f64"));
    }

    #[test]
    fn test_dynamic_spec() {
        let h = astype_dynamic(&source(), &"torch.half").unwrap();
        assert_eq!(h.dtype(), DType::F16);
        let d = astype_dynamic(&source(), &DType::F64).unwrap();
        assert_eq!(d.dtype(), DType::F64);
        let s = astype_dynamic(&source(), &String::from("torch.short")).unwrap();
        assert_eq!(s.dtype(), DType::I16);
    }

    #[test]
    fn test_idempotent() {
        let t = T::from_f64_slice(&[1.1, -2.25, 3.0e10], 3, DType::F64, &CpuDevice).unwrap();
        let once = t.astype("torch.float32").unwrap();
        let twice = once.astype("torch.float32").unwrap();
        assert!(isclose(&once, &twice));
        assert!(twice.same_storage(&once));
    }

    #[test]
    fn test_input_unmodified() {
        let t = T::from_f64_slice(&[1.5, 2.5, 3.5, 4.5], (2, 2), DType::F64, &CpuDevice).unwrap();
        let i = t.astype("torch.int8").unwrap();
        assert_eq!(i.dims(), &[2, 2]);
        assert_eq!(i.to_vec::<i8>().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(t.dtype(), DType::F64);
        assert_eq!(t.to_f64_vec().unwrap(), vec![1.5, 2.5, 3.5, 4.5]);
    }
}
