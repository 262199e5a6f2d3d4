use contiguous_lib::collections::contiguous::Vector;

#[derive(Debug, Default, Clone)]
struct Noisy(u8);

impl Drop for Noisy {
    fn drop(&mut self) {
        println!("Dropped Noisy({})", self.0);
    }
}

fn main() {
    println!("\n[Vector]\n");

    let mut vec = Vector::<u8>::new();
    println!("{:?}", vec);

    for i in 0..8 {
        vec.push(i);
        println!("{:?}", vec);
    }

    vec.insert(2, 100);
    println!("{:?}", vec);
    let removed = vec.remove(3);
    println!("{:?}, {:?}", removed, vec);

    vec.resize(12);
    println!("{:?}", vec);
    vec.resize(0);
    println!("{:?}", vec);

    println!("\n[Copy and move]\n");

    let mut noisy = Vector::repeat_with(3, || Noisy(1));
    let copy = noisy.clone();
    let moved = noisy.take();
    println!("{:?}\n{:?}\n{:?}", noisy, copy, moved);

    let mut target = Vector::repeat_default(5);
    target.clone_from(&copy);
    println!("{:?}", target);
}
