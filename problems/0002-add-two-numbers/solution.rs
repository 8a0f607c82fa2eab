use kata_core::ListNode;

/// Digits are stored least significant first; returns the sum in the same form.
pub fn add_two_numbers(
    l1: Option<Box<ListNode>>,
    l2: Option<Box<ListNode>>,
) -> Option<Box<ListNode>> {
    let (mut a, mut b) = (l1, l2);
    let mut head: Option<Box<ListNode>> = None;
    let mut tail = &mut head;
    let mut carry = 0;

    while a.is_some() || b.is_some() || carry > 0 {
        let mut sum = carry;
        if let Some(node) = a {
            sum += node.val;
            a = node.next;
        }
        if let Some(node) = b {
            sum += node.val;
            b = node.next;
        }
        carry = sum / 10;
        tail = &mut tail.insert(Box::new(ListNode::new(sum % 10))).next;
    }
    head
}
