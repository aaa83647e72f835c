pub fn cons<T>(first: T, rest: Vec<T>) -> Vec<T> {
  let mut vec: Vec<T> = vec![first];
  vec.extend(rest);

  vec
}
