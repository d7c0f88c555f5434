mod common;

#[cfg(test)]
mod environment_tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tarn::environment::Environment;
    use tarn::value::Value;

    use crate::common::ident;

    fn frame() -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment::new()))
    }

    fn child(enclosing: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment::with_enclosing(Rc::clone(
            enclosing,
        ))))
    }

    #[test]
    fn define_then_get_in_same_frame() {
        let env = frame();
        env.borrow_mut().define("a", Value::Number(1.0));

        let value = env.borrow().get(&ident("a")).unwrap();
        assert_eq!(value, Value::Number(1.0));
    }

    #[test]
    fn redeclaration_overwrites_in_place() {
        let env = frame();
        env.borrow_mut().define("a", Value::Number(1.0));
        env.borrow_mut().define("a", Value::String("two".to_string()));

        let value = env.borrow().get(&ident("a")).unwrap();
        assert_eq!(value, Value::String("two".to_string()));
    }

    #[test]
    fn get_searches_outward_through_the_chain() {
        let global = frame();
        global.borrow_mut().define("a", Value::Number(7.0));
        let inner = child(&child(&global));

        let value = inner.borrow().get(&ident("a")).unwrap();
        assert_eq!(value, Value::Number(7.0));
    }

    #[test]
    fn get_fails_when_chain_is_exhausted() {
        let inner = child(&frame());

        let error = inner.borrow().get(&ident("missing")).unwrap_err();
        assert!(error.message.contains("Undefined variable 'missing'."));
    }

    #[test]
    fn assign_mutates_the_defining_frame() {
        let global = frame();
        global.borrow_mut().define("a", Value::Number(1.0));
        let inner = child(&global);

        inner
            .borrow_mut()
            .assign(&ident("a"), Value::Number(2.0))
            .unwrap();

        let value = global.borrow().get(&ident("a")).unwrap();
        assert_eq!(value, Value::Number(2.0));
    }

    #[test]
    fn assign_fails_for_a_name_never_defined() {
        let inner = child(&frame());

        let error = inner
            .borrow_mut()
            .assign(&ident("ghost"), Value::Nil)
            .unwrap_err();
        assert!(error.message.contains("Undefined variable 'ghost'."));
    }

    #[test]
    fn get_at_walks_exactly_the_requested_depth() {
        // The same name bound in two frames: depth must be honored exactly,
        // not found by nearest-match search.
        let global = frame();
        global
            .borrow_mut()
            .define("x", Value::String("global".to_string()));
        let mid = child(&global);
        mid.borrow_mut()
            .define("x", Value::String("mid".to_string()));
        let inner = child(&mid);

        assert_eq!(
            Environment::get_at(&inner, 1, "x"),
            Some(Value::String("mid".to_string()))
        );
        assert_eq!(
            Environment::get_at(&inner, 2, "x"),
            Some(Value::String("global".to_string()))
        );
    }

    #[test]
    fn get_at_does_not_fall_back_to_enclosing_frames() {
        let global = frame();
        global.borrow_mut().define("x", Value::Number(1.0));
        let inner = child(&global);

        // The landed frame has no 'x'; nearer/farther frames are not tried.
        assert_eq!(Environment::get_at(&inner, 0, "x"), None);
    }

    #[test]
    fn get_at_past_the_end_of_the_chain_is_none() {
        let inner = child(&frame());
        assert_eq!(Environment::get_at(&inner, 5, "x"), None);
    }

    #[test]
    fn assign_at_targets_exactly_the_requested_frame() {
        let global = frame();
        global.borrow_mut().define("x", Value::Number(1.0));
        let mid = child(&global);
        mid.borrow_mut().define("x", Value::Number(2.0));
        let inner = child(&mid);

        Environment::assign_at(&inner, 2, &ident("x"), Value::Number(9.0)).unwrap();

        assert_eq!(Environment::get_at(&inner, 2, "x"), Some(Value::Number(9.0)));
        // The nearer binding is untouched.
        assert_eq!(Environment::get_at(&inner, 1, "x"), Some(Value::Number(2.0)));
    }

    #[test]
    fn mutation_is_visible_through_every_holder_of_the_frame() {
        // Two references to the same frame alias the same bindings.
        let shared = frame();
        shared.borrow_mut().define("count", Value::Number(0.0));
        let holder_a = child(&shared);
        let holder_b = child(&shared);

        holder_a
            .borrow_mut()
            .assign(&ident("count"), Value::Number(5.0))
            .unwrap();

        let seen = holder_b.borrow().get(&ident("count")).unwrap();
        assert_eq!(seen, Value::Number(5.0));
    }
}
