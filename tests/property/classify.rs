use proptest::prelude::*;
use chocogate::exec::classify;

proptest! {
    #[test]
    fn classification_is_deterministic(
        code in proptest::option::of(any::<i32>()),
        stdout in ".{0,64}",
        stderr in ".{0,64}",
    ) {
        let a = classify(code, stdout.clone(), stderr.clone());
        let b = classify(code, stdout, stderr);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn success_iff_exit_zero(code in proptest::option::of(any::<i32>())) {
        let res = classify(code, String::new(), String::new());
        prop_assert_eq!(res.success, code == Some(0));
        prop_assert_eq!(res.exit_code, code.unwrap_or(1));
        prop_assert_eq!(res.reboot_required, code == Some(3010));
    }

    #[test]
    fn reboot_phrase_detected_in_any_casing(
        mask in proptest::collection::vec(any::<bool>(), 15),
        prefix in "[a-z ]{0,10}",
        in_stderr in any::<bool>(),
    ) {
        let phrase: String = "reboot required"
            .chars()
            .zip(mask)
            .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        let text = format!("{prefix}{phrase}");
        let (out, err) = if in_stderr { (String::new(), text) } else { (text, String::new()) };

        let res = classify(Some(0), out, err);
        prop_assert!(res.reboot_required);
        prop_assert!(res.success);
    }
}
