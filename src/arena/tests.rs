/*
** This file is a part of Tinder (XMPP stanza object model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** Tinder is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;

#[test]
fn alloc_and_get() {
    let mut arena = Arena::<String>::new().unwrap();
    assert_eq!(arena.stats().nr_slots, 0);
    let a = arena.alloc("a".to_string()).unwrap();
    let b = arena.alloc("b".to_string()).unwrap();
    assert_eq!(arena.get(a), "a");
    assert_eq!(arena.get(b), "b");
    arena.get_mut(a).push('x');
    assert_eq!(arena.get(a), "ax");
    assert_eq!(arena.stats().nr_slots, 2);
}

#[test]
fn growth() {
    let mut arena = Arena::<usize>::with_capacity(1).unwrap();
    for i in 0..1000 {
        assert_eq!(arena.alloc(i).unwrap() as usize, i);
    }
    let stats = arena.stats();
    assert_eq!(stats.nr_slots, 1000);
    assert!(stats.capacity >= 1000);
    assert_eq!(*arena.get(999), 999);
}

#[test]
fn handles() {
    let mut arena = Arena::<u8>::new().unwrap();
    let index = arena.alloc(7).unwrap();
    let id = arena.handle(index);
    assert_eq!(arena.resolve(id), Some(index));
    assert!(arena.owns(id));

    let mut other = Arena::<u8>::new().unwrap();
    other.alloc(1).unwrap();
    assert_eq!(other.resolve(id), None);
    assert!(!other.owns(id));
}

#[test]
fn clone_has_new_identity() {
    let mut arena = Arena::<u8>::new().unwrap();
    let index = arena.alloc(7).unwrap();
    let id = arena.handle(index);

    let mut copy = arena.clone();
    assert_eq!(*copy.get(index), 7);
    assert!(!copy.owns(id));
    assert!(copy.owns(copy.handle(index)));

    *copy.get_mut(index) = 9;
    assert_eq!(*arena.get(index), 7);
}

#[test]
fn freed_slots_are_reused() {
    let mut arena = Arena::<String>::new().unwrap();
    let a = arena.alloc("a".to_string()).unwrap();
    let b = arena.alloc("b".to_string()).unwrap();
    let old = arena.handle(a);

    arena.free(a, String::new());
    assert_eq!(arena.resolve(old), None);
    assert_eq!(arena.stats().nr_slots, 1);
    assert_eq!(arena.stats().nr_free, 1);

    let c = arena.alloc("c".to_string()).unwrap();
    assert_eq!(c, a);
    assert_eq!(arena.get(c), "c");
    assert_eq!(arena.get(b), "b");
    assert!(!arena.owns(old));
    assert!(arena.owns(arena.handle(c)));
    assert_eq!(arena.stats().nr_free, 0);
}
