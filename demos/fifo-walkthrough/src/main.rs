use mm1queue::BoundedCircularQueue;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type Queue = BoundedCircularQueue<&'static str>;

fn enqueue(queue: &mut Queue, item: &'static str) {
    info!(head = queue.head(), tail = queue.tail(), item, "enqueue");
    match queue.enqueue(item) {
        Ok(()) => println!("ok"),
        Err(err) => warn!("{err}"),
    }
}

fn dequeue(queue: &mut Queue) {
    info!(head = queue.head(), tail = queue.tail(), "dequeue");
    match queue.dequeue() {
        Some(item) => println!("departure {item}"),
        None => println!("no departure"),
    }
}

fn print_queue(queue: &Queue) {
    println!("\nQueue:");
    for (i, slot) in queue.slots().iter().enumerate() {
        match slot {
            Some(item) => println!("  {item}"),
            None => println!("  element {i} is empty"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut queue = Queue::new(3)?;

    print_queue(&queue);
    dequeue(&mut queue);
    print_queue(&queue);

    enqueue(&mut queue, "ab");
    print_queue(&queue);
    enqueue(&mut queue, "cd");
    dequeue(&mut queue);
    print_queue(&queue);

    enqueue(&mut queue, "ef");
    dequeue(&mut queue);
    print_queue(&queue);

    dequeue(&mut queue);
    dequeue(&mut queue);
    print_queue(&queue);

    enqueue(&mut queue, "gh");
    enqueue(&mut queue, "ij");
    enqueue(&mut queue, "kl");
    print_queue(&queue);

    println!("\nEnd of program.");
    Ok(())
}
